use std::ops::ControlFlow;

use crate::core::data::complex::Complex;

const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iterates `z = z² + c` from `z0` and returns the iteration at which `|z|`
/// exceeded 2, or `max_iterations` if it never did.
#[must_use]
pub fn escape_iterations(z0: Complex, c: Complex, max_iterations: u32) -> u32 {
    let iterations = (1..=max_iterations).try_fold(z0, |z, iteration| {
        if z.magnitude_squared() > ESCAPE_RADIUS_SQUARED {
            ControlFlow::Break(iteration - 1)
        } else {
            ControlFlow::Continue(z.square() + c)
        }
    });

    match iterations {
        ControlFlow::Break(iteration) => iteration,
        ControlFlow::Continue(_) => max_iterations,
    }
}

#[must_use]
pub fn mandelbrot(point: Complex, max_iterations: u32) -> u32 {
    escape_iterations(Complex::ZERO, point, max_iterations)
}

#[must_use]
pub fn julia(point: Complex, constant: Complex, max_iterations: u32) -> u32 {
    escape_iterations(point, constant, max_iterations)
}
