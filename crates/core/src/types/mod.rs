//! Core types for Crew Lounge.
//!
//! Type-safe wrappers and models for the marketplace's domain concepts.

pub mod credential;
pub mod email;
pub mod gig;
pub mod id;
pub mod layover;
pub mod message;
pub mod price;
pub mod property;
pub mod review;
pub mod status;
pub mod user;

pub use credential::AuthToken;
pub use email::{Email, EmailError};
pub use gig::{Gig, GigQuery, NewGig};
pub use id::*;
pub use layover::{
    Attraction, Hotel, Layover, LayoverDetails, LayoverQuery, NewRecommendation, NewTravelTip,
    Recommendation, RecommendationComment, Restaurant, TravelTip,
};
pub use message::{Conversation, LatestMessage, Message, NewMessage, Participant, PropertyRef};
pub use price::{CurrencyCode, Price};
pub use property::{NewProperty, Property, PropertyQuery};
pub use review::{NewReview, Review, ReviewError};
pub use status::*;
pub use user::{Permissions, User};
