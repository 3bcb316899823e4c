// Service exports
pub mod users;
pub mod weather;

pub use users::{InMemoryUserDirectory, UserDirectory, UserDirectoryError};
pub use weather::{CachedWeather, OpenWeatherClient, StaticWeather, WeatherError, WeatherProvider};
