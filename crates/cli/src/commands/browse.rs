//! Public listings: `properties`, `layovers` and `gigs`.

use crew_lounge_client::Session;
use crew_lounge_core::{GigQuery, LayoverQuery, PropertyCategory, PropertyQuery};

use super::{CliError, emit};
use crate::output;

pub async fn properties(
    session: &Session,
    category: Option<PropertyCategory>,
) -> Result<(), CliError> {
    let query = PropertyQuery {
        category,
        ..PropertyQuery::default()
    };
    let envelope = session.services().properties().get_properties(&query).await?;
    let listings = envelope.data.unwrap_or_default();
    emit(&output::properties(&listings, envelope.count));
    Ok(())
}

pub async fn layovers(session: &Session, city: Option<String>) -> Result<(), CliError> {
    let query = LayoverQuery {
        city,
        ..LayoverQuery::default()
    };
    let envelope = session.services().layovers().get_layovers(&query).await?;
    emit(&output::layovers(&envelope.data.unwrap_or_default()));
    Ok(())
}

/// Gigs, either at one airport or across the board.
pub async fn gigs(session: &Session, airport: Option<String>) -> Result<(), CliError> {
    let gigs = session.services().gigs();
    let list = match airport {
        Some(code) => gigs.get_gigs_by_airport(&code.to_ascii_uppercase()).await?,
        None => gigs.get_gigs(&GigQuery::default()).await?.data.unwrap_or_default(),
    };
    emit(&output::gigs(&list));
    Ok(())
}
