//! Current conditions for the header line, read from Open-Meteo with a
//! BigDataCloud reverse geocode for the place name.

use serde::Deserialize;
use thiserror::Error;

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Weather service returned status {0}")]
    Status(u16),
    #[error("Weather response had no current reading")]
    MissingReading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Showers,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Groups WMO weather interpretation codes.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1..=3 => WeatherCondition::PartlyCloudy,
            45..=48 => WeatherCondition::Fog,
            51..=57 => WeatherCondition::Drizzle,
            61..=67 => WeatherCondition::Rain,
            71..=77 => WeatherCondition::Snow,
            80..=82 => WeatherCondition::Showers,
            95..=99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Showers => "Showers",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Unknown => "Weather",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "☀️",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Fog => "🌫️",
            WeatherCondition::Drizzle | WeatherCondition::Showers => "🌦️",
            WeatherCondition::Rain => "🌧️",
            WeatherCondition::Snow => "🌨️",
            WeatherCondition::Thunderstorm => "⛈️",
            WeatherCondition::Unknown => "🌤️",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature_f: f64,
    pub wind_mph: f64,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Place {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Place {
    pub fn label(&self) -> String {
        let city = self.city.trim();
        let state = self.state.trim();
        let country = self.country.trim();

        match (city.is_empty(), state.is_empty(), country.is_empty()) {
            (false, false, _) => format!("{}, {}", city, state),
            (false, true, false) => format!("{}, {}", city, country),
            (false, true, true) => city.to_string(),
            (true, false, false) => format!("{}, {}", state, country),
            _ => country.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub weather: CurrentWeather,
    pub place: Option<Place>,
    pub place_error: Option<String>,
}

impl WeatherReport {
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{} {:.0}°F {} · wind {:.0} mph",
            self.weather.condition.symbol(),
            self.weather.temperature_f,
            self.weather.condition.label(),
            self.weather.wind_mph
        );

        if let Some(place) = &self.place {
            let label = place.label();
            if !label.is_empty() {
                line.push_str(" · ");
                line.push_str(&label);
            }
        }

        line
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<ForecastCurrent>,
}

#[derive(Debug, Deserialize)]
struct ForecastCurrent {
    temperature_2m: Option<f64>,
    weather_code: Option<i64>,
    wind_speed_10m: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GeocodeResponse {
    city: String,
    locality: String,
    principal_subdivision: String,
    country_name: String,
    locality_info: Option<LocalityInfo>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LocalityInfo {
    administrative: Vec<AdministrativeArea>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct AdministrativeArea {
    name: String,
}

impl GeocodeResponse {
    fn into_place(self) -> Place {
        let administrative = self
            .locality_info
            .and_then(|info| info.administrative.into_iter().next())
            .map(|area| area.name)
            .unwrap_or_default();

        let city = [self.city, self.locality, self.principal_subdivision.clone(), administrative]
            .into_iter()
            .find(|candidate| !candidate.trim().is_empty())
            .unwrap_or_default();

        Place {
            city,
            state: self.principal_subdivision,
            country: self.country_name,
        }
    }
}

pub struct WeatherClient {
    forecast_url: String,
    geocode_url: String,
    client: reqwest::Client,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::with_base_urls(FORECAST_URL.to_string(), GEOCODE_URL.to_string())
    }

    pub fn with_base_urls(forecast_url: String, geocode_url: String) -> Self {
        Self {
            forecast_url,
            geocode_url,
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the reading and the place name concurrently.
    pub async fn current(&self, lat: f64, lon: f64) -> Result<WeatherReport, WeatherError> {
        let (weather, place) = tokio::join!(self.fetch_weather(lat, lon), self.fetch_place(lat, lon));
        let weather = weather?;

        let (place, place_error) = match place {
            Ok(place) => (Some(place), None),
            Err(e) => {
                tracing::warn!("Reverse geocode failed: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Ok(WeatherReport { weather, place, place_error })
    }

    async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<CurrentWeather, WeatherError> {
        let response = self.client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", "temperature_2m,weather_code,wind_speed_10m".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("windspeed_unit", "mph".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: ForecastResponse = response.json().await?;
        let current = body.current.ok_or(WeatherError::MissingReading)?;

        Ok(CurrentWeather {
            temperature_f: current.temperature_2m.ok_or(WeatherError::MissingReading)?,
            wind_mph: current.wind_speed_10m.unwrap_or_default(),
            condition: WeatherCondition::from_code(current.weather_code.unwrap_or(-1)),
        })
    }

    async fn fetch_place(&self, lat: f64, lon: f64) -> Result<Place, WeatherError> {
        let response = self.client
            .get(&self.geocode_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(body.into_place())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn place(city: &str, state: &str, country: &str) -> Place {
        Place {
            city: city.to_string(),
            state: state.to_string(),
            country: country.to_string(),
        }
    }

    #[test]
    fn weather_codes_are_grouped() {
        assert_eq!(WeatherCondition::from_code(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_code(2), WeatherCondition::PartlyCloudy);
        assert_eq!(WeatherCondition::from_code(48), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_code(55), WeatherCondition::Drizzle);
        assert_eq!(WeatherCondition::from_code(63), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_code(75), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_code(81), WeatherCondition::Showers);
        assert_eq!(WeatherCondition::from_code(96), WeatherCondition::Thunderstorm);
        assert_eq!(WeatherCondition::from_code(4), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::from_code(-1), WeatherCondition::Unknown);
    }

    #[test]
    fn place_label_prefers_city_and_state() {
        assert_eq!(place("Palm Beach", "Florida", "USA").label(), "Palm Beach, Florida");
        assert_eq!(place("Paris", "", "France").label(), "Paris, France");
        assert_eq!(place("Nowhere", "", "").label(), "Nowhere");
        assert_eq!(place("", "Ontario", "Canada").label(), "Ontario, Canada");
        assert_eq!(place("", "", "Chile").label(), "Chile");
        assert_eq!(place("", "Ontario", "").label(), "");
        assert_eq!(place("", "", "").label(), "");
    }

    #[test]
    fn geocode_city_falls_back_through_locality_fields() {
        let body: GeocodeResponse = serde_json::from_value(json!({
            "city": "",
            "locality": "",
            "principalSubdivision": "",
            "countryName": "Iceland",
            "localityInfo": { "administrative": [{ "name": "Reykjavik" }] }
        }))
        .unwrap();

        assert_eq!(body.into_place(), place("Reykjavik", "", "Iceland"));
    }

    #[tokio::test]
    async fn current_combines_reading_and_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("temperature_unit", "fahrenheit"))
            .and(query_param("windspeed_unit", "mph"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": { "temperature_2m": 81.6, "weather_code": 3, "wind_speed_10m": 9.2 }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geocode"))
            .and(query_param("localityLanguage", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "West Palm Beach",
                "principalSubdivision": "Florida",
                "countryName": "United States of America"
            })))
            .mount(&server)
            .await;
        let client = WeatherClient::with_base_urls(
            format!("{}/forecast", server.uri()),
            format!("{}/geocode", server.uri()),
        );

        let report = client.current(26.6168, -80.0684).await.unwrap();

        assert_eq!(report.weather.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(report.summary_line(), "⛅ 82°F Partly cloudy · wind 9 mph · West Palm Beach, Florida");
        assert_eq!(report.place_error, None);
    }

    #[tokio::test]
    async fn place_failure_keeps_reading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "current": { "temperature_2m": 70.0, "weather_code": 0, "wind_speed_10m": 0.0 }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/geocode"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let client = WeatherClient::with_base_urls(
            format!("{}/forecast", server.uri()),
            format!("{}/geocode", server.uri()),
        );

        let report = client.current(0.0, 0.0).await.unwrap();

        assert_eq!(report.place, None);
        assert!(report.place_error.is_some());
        assert_eq!(report.summary_line(), "☀️ 70°F Clear · wind 0 mph");
    }

    #[tokio::test]
    async fn forecast_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let client = WeatherClient::with_base_urls(
            format!("{}/forecast", server.uri()),
            format!("{}/geocode", server.uri()),
        );

        let err = client.current(0.0, 0.0).await.unwrap_err();

        assert!(matches!(err, WeatherError::Status(500)));
    }
}
