pub mod tba;
