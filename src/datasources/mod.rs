pub mod geoip;
pub mod openweathermap;

pub use geoip::GeoIpClient;
pub use openweathermap::{OpenWeatherMapClient, WeatherQuery};
