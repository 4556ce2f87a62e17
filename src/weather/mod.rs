pub mod lookup;
pub mod openweather;
pub mod types;
