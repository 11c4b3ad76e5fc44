pub mod pixelate;
