pub mod output_surface;
