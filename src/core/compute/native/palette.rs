use crate::core::data::colour::Colour;

/// Fire gradient: black through red, orange and yellow to white.
/// `iterations == max_iterations` (inside the set) is black.
#[must_use]
pub fn fire_gradient(iterations: u32, max_iterations: u32) -> Colour {
    if iterations >= max_iterations {
        return Colour::BLACK;
    }

    let t = iterations as f64 / max_iterations as f64;

    let (r, g, b) = if t < 0.25 {
        ((t / 0.25 * 255.0) as u8, 0, 0)
    } else if t < 0.5 {
        (255, ((t - 0.25) / 0.25 * 165.0) as u8, 0)
    } else if t < 0.75 {
        (255, (165.0 + (t - 0.5) / 0.25 * 90.0) as u8, 0)
    } else {
        (255, 255, ((t - 0.75) / 0.25 * 255.0) as u8)
    };

    Colour { r, g, b }
}

/// Colour lookup keyed by iteration count, owned by a single module instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    max_iters: u32,
    cells: Vec<u32>,
}

impl Palette {
    #[must_use]
    pub fn generate(max_iters: u32) -> Self {
        let cells = (0..=max_iters)
            .map(|iterations| fire_gradient(iterations, max_iters).to_rgba())
            .collect();

        Self { max_iters, cells }
    }

    /// The `max_iters` this palette was built for; 0 if never generated.
    #[must_use]
    pub fn max_iters(&self) -> u32 {
        self.max_iters
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Packed colour for `iterations`. Counts past the end clamp to the last
    /// entry; an empty palette is all black.
    #[must_use]
    pub fn cell(&self, iterations: u32) -> u32 {
        self.cells
            .get(iterations as usize)
            .or_else(|| self.cells.last())
            .copied()
            .unwrap_or(Colour::BLACK.to_rgba())
    }
}
