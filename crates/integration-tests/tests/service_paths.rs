//! Every service call maps to the expected method, path and credentials.

#![allow(clippy::unwrap_used)]

use crew_lounge_client::{FileUpload, PasswordChange, UpdateDetailsRequest};
use crew_lounge_core::{
    GigId, GigQuery, LayoverDetails, LayoverId, LayoverQuery, MessageId, NewGig, NewMessage,
    NewProperty, NewRecommendation, NewReview, NewTravelTip, PropertyCategory, PropertyId,
    PropertyQuery, RecommendationId, TipMood, TravelTipId, UserId,
};
use crew_lounge_integration_tests::{TestContext, member};
use reqwest::Method;
use serde_json::{Value, json};

/// Assert the last request hit `method path` and whether it carried the token.
fn assert_last(ctx: &TestContext, method: &Method, path: &str, authenticated: bool) {
    let request = ctx.backend.last_request().unwrap();
    assert_eq!(&request.method, method, "{path}");
    assert_eq!(request.url, format!("http://crew-lounge.test/api/v1{path}"));
    assert_eq!(
        request.headers.contains_key("authorization"),
        authenticated,
        "{method} {path}"
    );
}

fn reply(ctx: &TestContext, method: Method, path: &str, data: Value) {
    ctx.backend
        .on_json(method, path, 200, &json!({"success": true, "data": data}));
}

fn property() -> Value {
    json!({"_id": "p1", "title": "JFK Crashpad"})
}

fn layover() -> Value {
    json!({"_id": "l1", "city": "London", "country": "UK", "airport": "LHR"})
}

fn recommendation() -> Value {
    json!({"_id": "r1", "name": "Dishoom", "type": "restaurant", "description": "Breakfast"})
}

fn review() -> Value {
    json!({"_id": "v1", "title": "Great", "text": "Quiet", "rating": 5})
}

fn gig() -> Value {
    json!({
        "_id": "g1", "title": "Ferry", "description": "A320", "type": "ferry",
        "location": "Atlanta", "airport": "ATL", "compensation": "$500",
        "contactEmail": "ops@example.com"
    })
}

fn message() -> Value {
    json!({
        "_id": "m1", "content": "Hi",
        "sender": {"_id": "u1", "name": "Alex"},
        "receiver": {"_id": "u2", "name": "Sam"}
    })
}

#[tokio::test]
async fn test_auth_paths() {
    let ctx = TestContext::with_token("abc");
    let auth = ctx.services().auth();

    ctx.me_returns("user", "approved");
    auth.get_current_user().await.unwrap();
    assert_last(&ctx, &Method::GET, "/auth/me", true);

    reply(&ctx, Method::PUT, "/auth/updatedetails", member("user", "approved"));
    auth.update_user_details(&UpdateDetailsRequest::default())
        .await
        .unwrap();
    assert_last(&ctx, &Method::PUT, "/auth/updatedetails", true);

    reply(&ctx, Method::PUT, "/auth/updatepassword", json!({}));
    auth.update_password(&PasswordChange::new("a", "b"))
        .await
        .unwrap();
    assert_last(&ctx, &Method::PUT, "/auth/updatepassword", true);

    reply(&ctx, Method::POST, "/auth/verificationdocuments", json!("doc.pdf"));
    auth.upload_verification_document(FileUpload::new("doc.pdf", "application/pdf", vec![1]))
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/auth/verificationdocuments", true);

    auth.logout().await.unwrap();
    assert_last(&ctx, &Method::GET, "/auth/logout", false);
}

#[tokio::test]
async fn test_property_paths() {
    let ctx = TestContext::with_token("abc");
    let properties = ctx.services().properties();
    let id = PropertyId::new("p1");

    reply(&ctx, Method::GET, "/properties", json!([property()]));
    properties
        .get_properties(&PropertyQuery::default())
        .await
        .unwrap();
    assert_last(&ctx, &Method::GET, "/properties", false);

    reply(&ctx, Method::GET, "/properties?category=vacation", json!([]));
    properties
        .get_properties_by_category(PropertyCategory::Vacation)
        .await
        .unwrap();
    assert_last(&ctx, &Method::GET, "/properties?category=vacation", false);

    reply(&ctx, Method::GET, "/properties/p1", property());
    properties.get_property(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/properties/p1", false);

    reply(&ctx, Method::POST, "/properties", property());
    properties
        .create_property(&NewProperty::default())
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/properties", true);

    properties
        .create_property_with_images(&NewProperty::default(), vec![])
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/properties", true);

    reply(&ctx, Method::PUT, "/properties/p1", property());
    properties
        .update_property(&id, &NewProperty::default())
        .await
        .unwrap();
    assert_last(&ctx, &Method::PUT, "/properties/p1", true);

    reply(&ctx, Method::DELETE, "/properties/p1", json!({}));
    properties.delete_property(&id).await.unwrap();
    assert_last(&ctx, &Method::DELETE, "/properties/p1", true);

    reply(&ctx, Method::GET, "/properties/radius/02134/10", json!([]));
    properties
        .get_properties_in_radius("02134", 10)
        .await
        .unwrap();
    assert_last(&ctx, &Method::GET, "/properties/radius/02134/10", false);

    reply(&ctx, Method::GET, "/properties/p1/reviews", json!([review()]));
    properties.get_property_reviews(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/properties/p1/reviews", false);

    reply(&ctx, Method::POST, "/properties/p1/reviews", review());
    properties
        .add_property_review(&id, &NewReview::new("Great", "Quiet", 5).unwrap())
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/properties/p1/reviews", true);
}

#[tokio::test]
async fn test_layover_paths() {
    let ctx = TestContext::with_token("abc");
    let layovers = ctx.services().layovers();
    let id = LayoverId::new("l1");
    let rid = RecommendationId::new("r1");
    let details = LayoverDetails {
        city: "London".into(),
        country: "UK".into(),
        airport: "LHR".into(),
        ..LayoverDetails::default()
    };

    reply(&ctx, Method::GET, "/layovers", json!([layover()]));
    layovers.get_layovers(&LayoverQuery::default()).await.unwrap();
    assert_last(&ctx, &Method::GET, "/layovers", false);

    reply(&ctx, Method::GET, "/layovers/l1", layover());
    layovers.get_layover(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/layovers/l1", false);

    reply(&ctx, Method::POST, "/layovers", layover());
    layovers.create_layover(&details).await.unwrap();
    assert_last(&ctx, &Method::POST, "/layovers", true);

    layovers
        .create_layover_with_image(&details, FileUpload::new("c.jpg", "image/jpeg", vec![1]))
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/layovers", true);

    reply(&ctx, Method::PUT, "/layovers/l1/image", json!("c.jpg"));
    layovers
        .upload_layover_image(&id, FileUpload::new("c.jpg", "image/jpeg", vec![1]))
        .await
        .unwrap();
    assert_last(&ctx, &Method::PUT, "/layovers/l1/image", true);

    reply(&ctx, Method::PUT, "/layovers/l1", layover());
    layovers.update_layover(&id, &details).await.unwrap();
    assert_last(&ctx, &Method::PUT, "/layovers/l1", true);

    reply(&ctx, Method::DELETE, "/layovers/l1", json!({}));
    layovers.delete_layover(&id).await.unwrap();
    assert_last(&ctx, &Method::DELETE, "/layovers/l1", true);

    reply(&ctx, Method::GET, "/layovers/l1/reviews", json!([review()]));
    layovers.get_layover_reviews(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/layovers/l1/reviews", false);

    reply(&ctx, Method::POST, "/layovers/l1/reviews", review());
    layovers
        .add_layover_review(&id, &NewReview::new("Great", "Quiet", 4).unwrap())
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/layovers/l1/reviews", true);

    reply(&ctx, Method::GET, "/layovers/l1/recommendations", json!([recommendation()]));
    layovers.get_recommendations(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/layovers/l1/recommendations", false);

    reply(&ctx, Method::GET, "/layovers/l1/recommendations/r1", recommendation());
    layovers.get_recommendation(&id, &rid).await.unwrap();
    assert_last(&ctx, &Method::GET, "/layovers/l1/recommendations/r1", false);

    reply(&ctx, Method::POST, "/layovers/l1/recommendations", recommendation());
    let new_recommendation = NewRecommendation {
        name: "Dishoom".into(),
        kind: "restaurant".into(),
        description: "Breakfast".into(),
        ..NewRecommendation::default()
    };
    layovers
        .add_recommendation(&id, &new_recommendation)
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/layovers/l1/recommendations", true);

    reply(&ctx, Method::POST, "/layovers/l1/recommendations/r1/comments", recommendation());
    layovers
        .add_recommendation_comment(&id, &rid, "Go early")
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/layovers/l1/recommendations/r1/comments", true);

    let tip = json!({"_id": "t1", "text": "Take the tube", "mood": "happy"});
    reply(&ctx, Method::GET, "/layovers/l1/travelTips", json!([tip]));
    layovers.get_travel_tips(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/layovers/l1/travelTips", false);

    reply(&ctx, Method::POST, "/layovers/l1/travelTips", tip);
    layovers
        .add_travel_tip(
            &id,
            &NewTravelTip {
                text: "Take the tube".into(),
                mood: TipMood::Happy,
            },
        )
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/layovers/l1/travelTips", true);

    reply(&ctx, Method::DELETE, "/layovers/l1/travelTips/t1", json!({}));
    layovers
        .delete_travel_tip(&id, &TravelTipId::new("t1"))
        .await
        .unwrap();
    assert_last(&ctx, &Method::DELETE, "/layovers/l1/travelTips/t1", true);
}

#[tokio::test]
async fn test_gig_paths() {
    let ctx = TestContext::with_token("abc");
    let gigs = ctx.services().gigs();
    let id = GigId::new("g1");
    let new_gig: NewGig = serde_json::from_value(gig()).unwrap();

    reply(&ctx, Method::GET, "/gigs?airport=ATL", json!([gig()]));
    gigs.get_gigs(&GigQuery {
        airport: Some("ATL".into()),
        ..GigQuery::default()
    })
    .await
    .unwrap();
    assert_last(&ctx, &Method::GET, "/gigs?airport=ATL", false);

    reply(&ctx, Method::GET, "/gigs/g1", gig());
    gigs.get_gig(&id).await.unwrap();
    assert_last(&ctx, &Method::GET, "/gigs/g1", false);

    reply(&ctx, Method::POST, "/gigs", gig());
    gigs.create_gig(&new_gig).await.unwrap();
    assert_last(&ctx, &Method::POST, "/gigs", true);

    reply(&ctx, Method::PUT, "/gigs/g1", gig());
    gigs.update_gig(&id, &new_gig).await.unwrap();
    assert_last(&ctx, &Method::PUT, "/gigs/g1", true);

    reply(&ctx, Method::DELETE, "/gigs/g1", json!({}));
    gigs.delete_gig(&id).await.unwrap();
    assert_last(&ctx, &Method::DELETE, "/gigs/g1", true);

    reply(&ctx, Method::GET, "/gigs/airport/JFK", json!([]));
    gigs.get_gigs_by_airport("JFK").await.unwrap();
    assert_last(&ctx, &Method::GET, "/gigs/airport/JFK", false);
}

#[tokio::test]
async fn test_message_paths() {
    let ctx = TestContext::with_token("abc");
    let messages = ctx.services().messages();
    let other = UserId::new("u2");

    reply(&ctx, Method::GET, "/messages/conversations", json!([]));
    messages.get_conversations().await.unwrap();
    assert_last(&ctx, &Method::GET, "/messages/conversations", true);

    reply(&ctx, Method::GET, "/messages/u2", json!([message()]));
    messages.get_messages_by_user(&other).await.unwrap();
    assert_last(&ctx, &Method::GET, "/messages/u2", true);

    reply(&ctx, Method::POST, "/messages", message());
    messages
        .send_message(&NewMessage::new(other.clone(), "Hi"))
        .await
        .unwrap();
    assert_last(&ctx, &Method::POST, "/messages", true);

    reply(&ctx, Method::PUT, "/messages/read/u2", json!({}));
    messages.mark_as_read(&other).await.unwrap();
    assert_last(&ctx, &Method::PUT, "/messages/read/u2", true);

    reply(&ctx, Method::DELETE, "/messages/m1", json!({}));
    messages.delete_message(&MessageId::new("m1")).await.unwrap();
    assert_last(&ctx, &Method::DELETE, "/messages/m1", true);
}
