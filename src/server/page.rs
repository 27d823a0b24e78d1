//! HTML rendering for the index page.
//!
//! Presentation only: a main-city card, a featured grid, and a searchable
//! list of every registry city, plus a theme toggle and periodic refresh on
//! the client. None of this is part of the JSON contract.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::clock;
use crate::config::Config;
use crate::phase::DayPhase;
use crate::registry::CityRegistry;
use crate::sun::SunWindow;

const STYLE: &str = r#"
:root {
  --bg: #2c3e50; --panel: #34495e; --accent: #3498db; --text: #ecf0f1;
  --muted: #95a5a6;
}
[data-theme="light"] {
  --bg: #ecf0f1; --panel: #ffffff; --accent: #2980b9; --text: #2c3e50;
  --muted: #7f8c8d;
}
* { box-sizing: border-box; }
body {
  margin: 0; padding: 24px; background: var(--bg); color: var(--text);
  font-family: 'Arial', sans-serif;
}
header { display: flex; justify-content: space-between; align-items: center; }
h1 { color: var(--accent); margin: 0 0 16px; }
button#theme {
  background: var(--panel); color: var(--text); border: 1px solid var(--accent);
  border-radius: 8px; padding: 8px 14px; cursor: pointer;
}
.main-card {
  text-align: center; border: 2px solid var(--accent); padding: 32px;
  border-radius: 15px; background: var(--panel);
  box-shadow: 0 10px 20px rgba(0,0,0,0.2); margin-bottom: 24px;
}
.main-card .clock { font-size: 4em; font-weight: bold; margin: 0; }
.main-card .date { font-size: 1.4em; color: var(--muted); }
.main-card .sun { color: var(--muted); margin-top: 8px; }
.grid {
  display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
  gap: 16px; margin-bottom: 24px;
}
.card {
  background: var(--panel); border-radius: 12px; padding: 16px;
  border: 1px solid var(--accent);
}
.card .time { font-size: 1.8em; font-weight: bold; }
.card .meta { color: var(--muted); font-size: 0.9em; }
input#search {
  width: 100%; padding: 10px 14px; border-radius: 8px; margin-bottom: 12px;
  border: 1px solid var(--accent); background: var(--panel); color: var(--text);
}
ul#cities { list-style: none; padding: 0; margin: 0; }
ul#cities li {
  padding: 8px 12px; border-bottom: 1px solid var(--bg);
  background: var(--panel); display: flex; justify-content: space-between;
}
ul#cities li span.zone { color: var(--muted); }
"#;

const SCRIPT: &str = r#"
const saved = localStorage.getItem('theme');
if (saved) document.documentElement.setAttribute('data-theme', saved);
document.getElementById('theme').addEventListener('click', () => {
  const root = document.documentElement;
  const next = root.getAttribute('data-theme') === 'light' ? 'dark' : 'light';
  root.setAttribute('data-theme', next);
  localStorage.setItem('theme', next);
});
document.getElementById('search').addEventListener('input', (e) => {
  const needle = e.target.value.toLowerCase();
  for (const li of document.querySelectorAll('#cities li')) {
    li.style.display = li.dataset.name.toLowerCase().includes(needle) ? '' : 'none';
  }
});
const mainCity = document.querySelector('.main-card').dataset.city;
setInterval(async () => {
  try {
    const res = await fetch('/api/time/' + encodeURIComponent(mainCity));
    if (!res.ok) return;
    const data = await res.json();
    document.querySelector('.main-card .clock').textContent = data.time;
    document.querySelector('.main-card .date').textContent = data.date;
  } catch (_) {}
}, 10000);
"#;

/// Render the full index page for the configured main and featured cities.
///
/// The config was validated at startup, so every configured name resolves;
/// a name that somehow does not is skipped rather than panicking.
pub fn render_index(registry: &CityRegistry, config: &Config, now: DateTime<Utc>) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = write!(html, "<title>{} Time - World Clock</title>\n", config.main_city);
    let _ = write!(html, "<style>{STYLE}</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header><h1>World Clock</h1>");
    html.push_str("<button id=\"theme\">Toggle theme</button></header>\n");

    if let Some(record) = registry.lookup(&config.main_city) {
        let snapshot = clock::resolve(record, now);
        let sun = SunWindow::estimate(Some(record), now);
        let _ = write!(
            html,
            "<div class=\"main-card\" data-city=\"{name}\">\n\
             <h1>{name}, {country}</h1>\n\
             <p class=\"clock\">{time}</p>\n\
             <p class=\"date\">{date}</p>\n\
             <p class=\"date\">{timezone}</p>\n\
             <p class=\"sun\">Sunrise {sunrise} · Sunset {sunset} · Daylight {duration}</p>\n\
             </div>\n",
            name = record.name,
            country = record.country,
            time = snapshot.time,
            date = snapshot.date,
            timezone = snapshot.timezone,
            sunrise = sun.sunrise,
            sunset = sun.sunset,
            duration = sun.duration,
        );
    }

    html.push_str("<div class=\"grid\">\n");
    for name in &config.featured_cities {
        let Some(record) = registry.lookup(name) else {
            continue;
        };
        let snapshot = clock::resolve(record, now);
        let phase = DayPhase::classify(clock::local_hour(record, now));
        let _ = write!(
            html,
            "<div class=\"card\">\n\
             <div class=\"meta\">{name} · {country}</div>\n\
             <div class=\"time\">{time}</div>\n\
             <div class=\"meta\">{phase} · UTC {offset}</div>\n\
             </div>\n",
            name = record.name,
            country = record.country,
            time = &snapshot.time[..5],
            phase = phase,
            offset = snapshot.utc_offset,
        );
    }
    html.push_str("</div>\n");

    html.push_str("<input id=\"search\" type=\"text\" placeholder=\"Search cities...\">\n");
    html.push_str("<ul id=\"cities\">\n");
    for record in registry.all() {
        let _ = write!(
            html,
            "<li data-name=\"{name}\"><span>{name}, {country}</span>\
             <span class=\"zone\">{zone}</span></li>\n",
            name = record.name,
            country = record.country,
            zone = record.zone_id,
        );
    }
    html.push_str("</ul>\n");

    let _ = write!(html, "<script>{SCRIPT}</script>\n");
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn page_contains_every_registry_city() {
        let registry = CityRegistry::load().unwrap();
        let config = Config::default();
        let now = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
        let html = render_index(&registry, &config, now);

        for record in registry.all() {
            assert!(html.contains(record.name), "page missing {}", record.name);
        }
        assert!(html.contains("17:00:00"));
        assert!(html.contains("data-city=\"Karachi\""));
        // Karachi's local hour (17) is odd, selecting the 45-minute sunrise.
        assert!(html.contains("Sunrise 06:45"));
    }

    #[test]
    fn unknown_featured_city_is_skipped_not_fatal() {
        let registry = CityRegistry::load().unwrap();
        let config = Config {
            featured_cities: vec!["Gotham".to_string(), "London".to_string()],
            ..Config::default()
        };
        let now = Utc.with_ymd_and_hms(2025, 6, 9, 12, 0, 0).unwrap();
        let html = render_index(&registry, &config, now);
        assert!(html.contains("London"));
    }
}
