pub mod city_weather_search;
pub mod report_cards;
pub mod search_bar;
pub mod title_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use city_weather_search::{
    CityWeatherSearch, CityWeatherSearchProps, ERROR_ICON, LOADING_TEXT,
    TOO_SMALL_TEXT,
};
pub use report_cards::{ReportCards, ReportCardsProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use title_header::{TitleHeader, TitleHeaderProps};
