pub mod colour;
pub mod complex;
pub mod pixel_buffer;
pub mod region_descriptor;
pub mod worker_id;
