//! Text and JSON rendering of a completed lookup.

use bandsintown::{Artist, Event};
use serde_json::json;

use crate::config::OutputFormat;

/// Renders the artist and their events in the requested format.
pub fn render(format: OutputFormat, artist: &Artist, events: &[Event]) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(details(artist, events)),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "artist": artist,
            "events": events,
        })),
    }
}

/// Artist block followed by one block per event.
pub fn details(artist: &Artist, events: &[Event]) -> String {
    format!(
        "{}\n\nEvents:\n{}",
        describe_artist(artist),
        describe_events(events)
    )
}

fn describe_artist(artist: &Artist) -> String {
    [artist.name.as_str(), artist.url.as_str()].join("\n")
}

fn describe_events(events: &[Event]) -> String {
    if events.is_empty() {
        return "(none)".to_string();
    }

    events
        .iter()
        .map(describe_event)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn describe_event(event: &Event) -> String {
    let mut lines = vec![event.datetime.clone()];
    if let Some(venue) = &event.venue {
        match &venue.city {
            Some(city) => lines.push(format!("@ {}, {}", venue.name, city)),
            None => lines.push(format!("@ {}", venue.name)),
        }
    }
    lines.extend(event.lineup.iter().cloned());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use bandsintown::Venue;

    use super::*;

    fn artist() -> Artist {
        serde_json::from_value(json!({
            "name": "Molchat Doma",
            "url": "https://www.bandsintown.com/a/510"
        }))
        .unwrap()
    }

    fn event(datetime: &str, lineup: &[&str]) -> Event {
        serde_json::from_value(json!({
            "id": "1",
            "datetime": datetime,
            "lineup": lineup,
        }))
        .unwrap()
    }

    #[test]
    fn test_text_details() {
        let events = vec![
            event("2023-06-01T20:00:00", &["Molchat Doma"]),
            event("2023-07-14T21:00:00", &["Molchat Doma", "Support"]),
        ];
        assert_eq!(
            details(&artist(), &events),
            "Molchat Doma\nhttps://www.bandsintown.com/a/510\n\nEvents:\n\
             2023-06-01T20:00:00\nMolchat Doma\n\n\
             2023-07-14T21:00:00\nMolchat Doma\nSupport"
        );
    }

    #[test]
    fn test_venue_line() {
        let mut with_venue = event("2023-06-01T20:00:00", &["Molchat Doma"]);
        with_venue.venue = Some(Venue {
            name: "Tempodrom".to_string(),
            city: Some("Berlin".to_string()),
            region: None,
            country: None,
            latitude: None,
            longitude: None,
        });
        assert_eq!(
            describe_event(&with_venue),
            "2023-06-01T20:00:00\n@ Tempodrom, Berlin\nMolchat Doma"
        );
    }

    #[test]
    fn test_no_events() {
        assert!(details(&artist(), &[]).ends_with("Events:\n(none)"));
    }

    #[test]
    fn test_json_output() {
        let rendered = render(OutputFormat::Json, &artist(), &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["artist"]["name"], "Molchat Doma");
        assert_eq!(value["events"], json!([]));
    }
}
