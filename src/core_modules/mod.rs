pub mod color_predicate;
pub mod debug_overlay;
pub mod histogram;
pub mod pixel;
pub mod pixel_buffer;
pub mod rectangle;
pub mod region_locator;
pub mod run_scanner;
pub mod utils;
