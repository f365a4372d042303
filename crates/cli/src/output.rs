//! Plain-text rendering of command results.

use crew_lounge_client::SessionSnapshot;
use crew_lounge_core::{Conversation, Gig, Layover, Property};

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// The signed-in member and their permissions.
pub fn member(snapshot: &SessionSnapshot) -> Vec<String> {
    let Some(user) = snapshot.user.as_ref() else {
        return vec!["Not signed in.".to_string()];
    };

    let mut lines = vec![
        format!("{} <{}>", user.name, user.email),
        format!("Role: {}", user.role),
        format!("Status: {}", user.status),
    ];
    if let Some(airline) = &user.airline {
        lines.push(format!("Airline: {airline}"));
    }
    if let Some(position) = &user.position {
        lines.push(format!("Position: {position}"));
    }
    if !user.verification_documents.is_empty() {
        lines.push(format!(
            "Verification documents: {}",
            user.verification_documents.len()
        ));
    }
    lines.push(format!(
        "Can add listings: {}",
        yes_no(snapshot.can_add_listings())
    ));
    lines
}

pub fn properties(listings: &[Property], total: Option<u64>) -> Vec<String> {
    let mut lines: Vec<String> = listings
        .iter()
        .map(|p| {
            let price = p.price().map_or_else(
                || "price on request".to_string(),
                |price| match &p.price_per_unit {
                    Some(unit) => format!("{} {}", price.display(), unit.to_lowercase()),
                    None => price.display(),
                },
            );
            let category = p.category.map_or("", |c| c.as_str());
            format!(
                "{}  {} [{category}] {} - {price}",
                p.id,
                p.title,
                p.location.as_deref().unwrap_or("-"),
            )
        })
        .collect();
    lines.push(format!(
        "{} of {} listings",
        listings.len(),
        total.unwrap_or_else(|| u64::try_from(listings.len()).unwrap_or(u64::MAX))
    ));
    lines
}

pub fn layovers(guides: &[Layover]) -> Vec<String> {
    if guides.is_empty() {
        return vec!["No layover guides found.".to_string()];
    }
    guides
        .iter()
        .map(|l| {
            format!(
                "{}  {} {}, {}",
                l.id, l.details.airport, l.details.city, l.details.country
            )
        })
        .collect()
}

pub fn gigs(gigs: &[Gig]) -> Vec<String> {
    if gigs.is_empty() {
        return vec!["No gigs found.".to_string()];
    }
    gigs.iter()
        .map(|g| {
            format!(
                "{}  {} {} ({}) - {}",
                g.id, g.details.airport, g.details.title, g.details.kind, g.details.compensation
            )
        })
        .collect()
}

pub fn conversations(inbox: &[Conversation]) -> Vec<String> {
    if inbox.is_empty() {
        return vec!["No conversations yet.".to_string()];
    }
    inbox
        .iter()
        .map(|c| {
            let latest = c
                .latest_message
                .as_ref()
                .map_or("", |m| m.content.as_str());
            format!(
                "{} ({})  {} unread  {latest}",
                c.user.name, c.user.id, c.unread_count
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crew_lounge_client::SessionPhase;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_member_signed_out() {
        assert_eq!(member(&SessionSnapshot::default()), vec!["Not signed in."]);
    }

    #[test]
    fn test_member_shows_listing_permission() {
        let snapshot = SessionSnapshot {
            phase: SessionPhase::Authenticated,
            user: Some(
                serde_json::from_value(json!({
                    "_id": "u1",
                    "name": "Sam Pilot",
                    "email": "sam@example.com",
                    "role": "host",
                    "status": "pending",
                    "airline": "Delta"
                }))
                .unwrap(),
            ),
            ..SessionSnapshot::default()
        };

        let lines = member(&snapshot);
        assert_eq!(lines[0], "Sam Pilot <sam@example.com>");
        assert!(lines.contains(&"Status: pending".to_string()));
        assert!(lines.contains(&"Airline: Delta".to_string()));
        assert_eq!(lines.last().unwrap(), "Can add listings: no");
    }

    #[test]
    fn test_properties_lines() {
        let listing: Property = serde_json::from_value(json!({
            "_id": "p1",
            "title": "JFK Crashpad",
            "category": "crashpad",
            "location": "Queens, NY",
            "price": 45,
            "pricePerUnit": "Per Night"
        }))
        .unwrap();

        let lines = properties(&[listing], Some(12));
        assert_eq!(lines[0], "p1  JFK Crashpad [crashpad] Queens, NY - $45.00 per night");
        assert_eq!(lines[1], "1 of 12 listings");
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(gigs(&[]), vec!["No gigs found."]);
        assert_eq!(layovers(&[]), vec!["No layover guides found."]);
        assert_eq!(conversations(&[]), vec!["No conversations yet."]);
    }
}
