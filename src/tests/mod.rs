mod fixtures;
mod utils;
