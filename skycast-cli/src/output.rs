use chrono::Local;
use skycast_core::{SearchHistoryEntry, WeatherData, WeatherReport};

pub fn print_report(report: &WeatherReport) {
    println!("{}", report.location.label());
    print_weather(&report.weather);
}

pub fn print_entry(entry: &SearchHistoryEntry) {
    println!("{} (searched {})", entry.city_name, local_time(&entry.searched_at));
    print_weather(&entry.weather);
}

pub fn print_history(entries: &[SearchHistoryEntry]) {
    if entries.is_empty() {
        println!("No searches yet");
        return;
    }

    for entry in entries {
        println!(
            "{}  {} {:<20} {:>6.1}{}  {}",
            entry.id,
            entry.weather.icon(),
            entry.city_name,
            entry.weather.temperature,
            entry.weather.temperature_unit,
            local_time(&entry.searched_at),
        );
    }
}

fn print_weather(weather: &WeatherData) {
    println!("  {} {}", weather.icon(), weather.weather_description);
    println!("  Temperature: {}{}", weather.temperature, weather.temperature_unit);
    println!("  Humidity:    {}%", weather.humidity);
    println!("  Wind:        {} {}", weather.wind_speed, weather.wind_speed_unit);
    println!("  Observed:    {}", local_time(&weather.timestamp));
}

fn local_time(instant: &chrono::DateTime<chrono::Utc>) -> String {
    instant.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
