use stepwise::nalgebra as na;
use stepwise::{
    constrained_linear_least_square, gradient_descent, linear_least_square, newtons_method,
    residual_cost, run_iterations,
};
use na::{dmatrix, dvector, DMatrix, DVector};

fn main() -> Result<(), String> {
    // f(x) = x^2
    let iterations = gradient_descent(|x: &f64| x * x, |x: &f64| 2.0 * x, 10.0, 0.1);
    let result = run_iterations(iterations, 1000).map_err(|error| format!("{}", error))?;
    println!(
        "gradient descent: iter = {}\tx = {}\tcost = {}",
        result.index(),
        result.x(),
        result.cost()
    );

    // f(x) = sum x_i^2
    let iterations = newtons_method(
        |x: &DVector<f64>| x.norm_squared(),
        |x: &DVector<f64>| x * 2.0,
        |x: &DVector<f64>| DMatrix::identity(x.len(), x.len()) * 2.0,
        dvector![10.0, 0.0],
        1.0,
    );
    let result = run_iterations(iterations, 1000).map_err(|error| format!("{}", error))?;
    println!(
        "Newton: iter = {}\tx = {:?}\tcost = {}",
        result.index(),
        result.x().as_slice(),
        result.cost()
    );

    let a: DMatrix<f64> = dmatrix![0.1, 0.9; 0.2, 0.8];
    let b: DVector<f64> = dvector![0.3, 0.7];

    let x = linear_least_square(&a, &b).map_err(|error| format!("{}", error))?;
    let cost = residual_cost(&a, &x, &b).map_err(|error| format!("{}", error))?;
    println!("least squares: x = {:?}\tcost = {}", x.as_slice(), cost);

    let x = constrained_linear_least_square(&a, &b).map_err(|error| format!("{}", error))?;
    let cost = residual_cost(&a, &x, &b).map_err(|error| format!("{}", error))?;
    println!(
        "unit-norm least squares: x = {:?}\t|| x || = {}\tcost = {}",
        x.as_slice(),
        x.norm(),
        cost
    );

    Ok(())
}
