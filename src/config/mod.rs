use serde::Deserialize;
use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub layout: LayoutConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Форма схемы вагона: `rows` рядов, последний ряд может быть короче.
// Если ряд один, в нём `seats_per_row` мест
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    pub rows: u32,
    pub seats_per_row: u32,
    pub last_row_seats: u32,
}

impl Default for LayoutConfig {
    // 10 полных рядов по 7 мест и последний ряд на 3 места
    fn default() -> Self {
        Self {
            rows: 11,
            seats_per_row: 7,
            last_row_seats: 3,
        }
    }
}

impl LayoutConfig {
    pub fn row_sizes(&self) -> Vec<u32> {
        (1..=self.rows)
            .map(|row| {
                if row == self.rows && self.rows > 1 {
                    self.last_row_seats
                } else {
                    self.seats_per_row
                }
            })
            .collect()
    }
}

// Настройки бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Сколько раз повторить подбор на свежем снимке, если места успели занять
    pub commit_retries: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { commit_retries: 3 }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let layout_defaults = LayoutConfig::default();

        Ok(Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "seat_allocator=debug".to_string()),
            },
            layout: LayoutConfig {
                rows: parse_var("SEAT_ROWS", layout_defaults.rows)?,
                seats_per_row: parse_var("SEATS_PER_ROW", layout_defaults.seats_per_row)?,
                last_row_seats: parse_var("LAST_ROW_SEATS", layout_defaults.last_row_seats)?,
            },
            booking: BookingConfig {
                commit_retries: parse_var("COMMIT_RETRIES", BookingConfig::default().commit_retries)?,
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(default),
    }
}
