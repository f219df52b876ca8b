pub mod row_bands;
