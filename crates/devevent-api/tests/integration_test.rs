// Integration tests for DevEvent API
// Run with: cargo test --test integration_test

use devevent_contracts::{
    Agenda, Audience, Booking, BookingStatus, Event, EventStatus, ListResponse,
};
use reqwest::multipart;
use serde_json::json;

const API_BASE_URL: &str = "http://localhost:9000";

/// Minimal valid PNG (1x1 transparent pixel) for image upload parts.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn event_form(title: &str, slug: &str) -> multipart::Form {
    multipart::Form::new()
        .text("title", title.to_string())
        .text("slug", slug.to_string())
        .text("hook", "An evening of talks, demos, and pizza")
        .text("overview", "A meetup for developers of all levels")
        .text(
            "about",
            "Join us for lightning talks, live coding, and networking with local developers.",
        )
        .text("date", "2027-06-18T18:00:00Z")
        .text("time.from", "18:00")
        .text("time.to", "21:00")
        .text("venue", "Community Hall, Downtown")
        .text("mode", "in-person")
        .part(
            "image",
            multipart::Part::bytes(TINY_PNG.to_vec())
                .file_name("banner.png")
                .mime_str("image/png")
                .expect("valid mime"),
        )
}

#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_full_event_workflow() {
    let client = reqwest::Client::new();
    let run_tag = uuid::Uuid::new_v4().simple().to_string();
    let slug = format!("rust-meetup-{}", &run_tag[..8]);

    println!("🧪 Testing full event workflow...");

    // Step 1: Create an audience category
    println!("\n📝 Step 1: Creating audience...");
    let audience_response = client
        .post(format!("{}/v1/audiences", API_BASE_URL))
        .json(&json!({
            "category": format!("Backend Engineers {}", &run_tag[..8]),
            "description": "Engineers who build and operate services"
        }))
        .send()
        .await
        .expect("Failed to create audience");

    assert_eq!(
        audience_response.status(),
        201,
        "Expected 201 Created, got {}",
        audience_response.status()
    );
    let audience: Audience = audience_response
        .json()
        .await
        .expect("Failed to parse audience response");
    println!("✅ Created audience: {}", audience.id);

    // Step 2: Create an event with a multipart form
    println!("\n📅 Step 2: Creating event...");
    let create_response = client
        .post(format!("{}/v1/events", API_BASE_URL))
        .multipart(event_form("Rust Meetup", &slug))
        .send()
        .await
        .expect("Failed to create event");

    let status = create_response.status();
    let body = create_response
        .text()
        .await
        .expect("Failed to read event response");
    println!("Create event response: {} {}", status, body);
    assert_eq!(status, 201, "Expected 201 Created. Response: {}", body);

    let event: Event = serde_json::from_str(&body).expect("Failed to parse event response");
    println!("✅ Created event: {} ({})", event.title, event.id);
    assert_eq!(event.slug, slug);
    assert_eq!(event.status, EventStatus::Draft);
    assert!(
        event.image.starts_with("http"),
        "Image should be a hosted URL, got {}",
        event.image
    );

    // Step 3: Get event by slug
    println!("\n🔍 Step 3: Getting event by slug...");
    let get_response = client
        .get(format!("{}/v1/events/slug/{}", API_BASE_URL, slug))
        .send()
        .await
        .expect("Failed to get event by slug");

    assert_eq!(get_response.status(), 200);
    let fetched: Event = get_response.json().await.expect("Failed to parse event");
    assert_eq!(fetched.id, event.id);
    println!("✅ Fetched event by slug: {}", fetched.slug);

    // Step 4: Duplicate slug is rejected with the duplicate-key code
    println!("\n🚫 Step 4: Creating duplicate slug...");
    let dup_response = client
        .post(format!("{}/v1/events", API_BASE_URL))
        .multipart(event_form("Rust Meetup Again", &slug))
        .send()
        .await
        .expect("Failed to send duplicate event");

    assert_eq!(dup_response.status(), 400);
    let dup_body: serde_json::Value = dup_response
        .json()
        .await
        .expect("Failed to parse duplicate response");
    println!("Duplicate response: {}", dup_body);
    assert_eq!(dup_body["code"], "DUPLICATE_KEY");
    assert_eq!(
        dup_body["message"],
        "An event with this slug already exists"
    );

    // Step 5: List events, newest first
    println!("\n📋 Step 5: Listing events...");
    let list_response = client
        .get(format!("{}/v1/events", API_BASE_URL))
        .send()
        .await
        .expect("Failed to list events");

    assert_eq!(list_response.status(), 200);
    let events: ListResponse<Event> =
        list_response.json().await.expect("Failed to parse events");
    println!("✅ Found {} event(s)", events.data.len());
    assert!(!events.data.is_empty());
    let position = events
        .data
        .iter()
        .position(|e| e.id == event.id)
        .expect("Created event missing from listing");
    assert_eq!(position, 0, "Newest event should be listed first");

    // Step 6: Update event and publish it
    println!("\n✏️  Step 6: Updating event...");
    let update_response = client
        .patch(format!("{}/v1/events/{}", API_BASE_URL, event.id))
        .json(&json!({
            "title": "Rust Meetup (Updated)",
            "status": "published"
        }))
        .send()
        .await
        .expect("Failed to update event");

    assert_eq!(update_response.status(), 200);
    let updated: Event = update_response.json().await.expect("Failed to parse event");
    assert_eq!(updated.title, "Rust Meetup (Updated)");
    assert_eq!(updated.status, EventStatus::Published);
    assert!(updated.updated_at > event.updated_at);
    println!("✅ Updated event: {}", updated.title);

    // Step 7: Attach the audience and resolve it back in order
    println!("\n🔗 Step 7: Attaching audience...");
    let attach_response = client
        .post(format!(
            "{}/v1/events/{}/audiences/{}",
            API_BASE_URL, event.id, audience.id
        ))
        .send()
        .await
        .expect("Failed to attach audience");

    assert_eq!(attach_response.status(), 200);
    let with_audience: Event = attach_response
        .json()
        .await
        .expect("Failed to parse event");
    assert!(with_audience.audience.contains(&audience.id));
    assert!(
        with_audience.updated_at > updated.updated_at,
        "Attaching a reference must advance updated_at"
    );

    // Attaching again is idempotent
    let attach_again = client
        .post(format!(
            "{}/v1/events/{}/audiences/{}",
            API_BASE_URL, event.id, audience.id
        ))
        .send()
        .await
        .expect("Failed to re-attach audience");
    let reattached: Event = attach_again.json().await.expect("Failed to parse event");
    assert_eq!(
        reattached.audience.iter().filter(|id| **id == audience.id).count(),
        1,
        "Attach must not duplicate the reference"
    );

    let resolved_response = client
        .get(format!(
            "{}/v1/events/{}/audiences",
            API_BASE_URL, event.id
        ))
        .send()
        .await
        .expect("Failed to resolve audiences");
    assert_eq!(resolved_response.status(), 200);
    let resolved: ListResponse<Audience> = resolved_response
        .json()
        .await
        .expect("Failed to parse audiences");
    assert!(resolved.data.iter().any(|a| a.id == audience.id));
    println!("✅ Audience attached and resolved");

    // Step 8: Create an agenda item, then detach and re-attach it
    println!("\n🗓️  Step 8: Creating agenda item...");
    let agenda_response = client
        .post(format!("{}/v1/agendas", API_BASE_URL))
        .json(&json!({
            "event": event.id,
            "title": "Opening keynote",
            "description": "Welcome and roadmap",
            "time": { "from": "18:00", "to": "18:30" }
        }))
        .send()
        .await
        .expect("Failed to create agenda item");

    assert_eq!(agenda_response.status(), 201);
    let item: Agenda = agenda_response
        .json()
        .await
        .expect("Failed to parse agenda item");
    assert_eq!(item.event, event.id);
    println!("✅ Created agenda item: {}", item.id);

    // Creation appended the reference to the event's agenda array
    let with_agenda = client
        .get(format!("{}/v1/events/{}", API_BASE_URL, event.id))
        .send()
        .await
        .expect("Failed to get event")
        .json::<Event>()
        .await
        .expect("Failed to parse event");
    assert!(with_agenda.agenda.contains(&item.id));

    let detach_agenda_response = client
        .delete(format!(
            "{}/v1/events/{}/agenda/{}",
            API_BASE_URL, event.id, item.id
        ))
        .send()
        .await
        .expect("Failed to detach agenda item");
    assert_eq!(detach_agenda_response.status(), 200);
    let without_item: Event = detach_agenda_response
        .json()
        .await
        .expect("Failed to parse event");
    assert!(!without_item.agenda.contains(&item.id));
    assert!(
        without_item.updated_at > with_agenda.updated_at,
        "Detaching a reference must advance updated_at"
    );

    let reattach_response = client
        .post(format!(
            "{}/v1/events/{}/agenda/{}",
            API_BASE_URL, event.id, item.id
        ))
        .send()
        .await
        .expect("Failed to re-attach agenda item");
    assert_eq!(reattach_response.status(), 200);
    let with_item_again: Event = reattach_response
        .json()
        .await
        .expect("Failed to parse event");
    assert!(with_item_again.agenda.contains(&item.id));

    // Resolution follows the event's listed order
    let agenda_list = client
        .get(format!("{}/v1/events/{}/agenda", API_BASE_URL, event.id))
        .send()
        .await
        .expect("Failed to resolve agenda")
        .json::<ListResponse<Agenda>>()
        .await
        .expect("Failed to parse agenda");
    assert!(agenda_list.data.iter().any(|a| a.id == item.id));
    println!("✅ Agenda item detached and re-attached");

    // Step 9: Detach the audience
    println!("\n✂️  Step 9: Detaching audience...");
    let detach_response = client
        .delete(format!(
            "{}/v1/events/{}/audiences/{}",
            API_BASE_URL, event.id, audience.id
        ))
        .send()
        .await
        .expect("Failed to detach audience");

    assert_eq!(detach_response.status(), 200);
    let detached: Event = detach_response.json().await.expect("Failed to parse event");
    assert!(!detached.audience.contains(&audience.id));
    println!("✅ Audience detached");

    println!("\n🎉 All event workflow tests passed!");
}

#[tokio::test]
#[ignore]
async fn test_booking_workflow() {
    let client = reqwest::Client::new();
    let run_tag = uuid::Uuid::new_v4().simple().to_string();
    let slug = format!("booking-event-{}", &run_tag[..8]);
    let email = format!("attendee-{}@example.com", &run_tag[..8]);

    println!("🧪 Testing booking workflow...");

    // Step 1: Create an event to book
    println!("\n📅 Step 1: Creating event...");
    let create_response = client
        .post(format!("{}/v1/events", API_BASE_URL))
        .multipart(event_form("Bookable Conference", &slug))
        .send()
        .await
        .expect("Failed to create event");
    assert_eq!(create_response.status(), 201);
    let event: Event = create_response.json().await.expect("Failed to parse event");

    // Step 2: Book it
    println!("\n🎟️  Step 2: Creating booking...");
    let booking_response = client
        .post(format!("{}/v1/bookings", API_BASE_URL))
        .json(&json!({
            "event": event.id,
            "email": email.to_uppercase()
        }))
        .send()
        .await
        .expect("Failed to create booking");

    assert_eq!(booking_response.status(), 201);
    let booking: Booking = booking_response
        .json()
        .await
        .expect("Failed to parse booking");
    println!("✅ Created booking: {}", booking.id);
    assert_eq!(booking.event, event.id);
    assert_eq!(booking.email, email, "Email should be lowercased");
    assert_eq!(booking.status, BookingStatus::Pending);

    // Step 3: Same email cannot book the same event twice
    println!("\n🚫 Step 3: Duplicate booking...");
    let dup_response = client
        .post(format!("{}/v1/bookings", API_BASE_URL))
        .json(&json!({
            "event": event.id,
            "email": email
        }))
        .send()
        .await
        .expect("Failed to send duplicate booking");

    assert_eq!(dup_response.status(), 400);
    let dup_body: serde_json::Value = dup_response
        .json()
        .await
        .expect("Failed to parse duplicate response");
    assert_eq!(dup_body["code"], "DUPLICATE_KEY");
    assert_eq!(
        dup_body["message"],
        "This email has already booked this event"
    );
    println!("✅ Duplicate booking rejected");

    // Step 4: Booking a nonexistent event is a bad request, not a 500
    println!("\n🚫 Step 4: Booking nonexistent event...");
    let missing_response = client
        .post(format!("{}/v1/bookings", API_BASE_URL))
        .json(&json!({
            "event": uuid::Uuid::new_v4(),
            "email": format!("other-{}@example.com", &run_tag[..8])
        }))
        .send()
        .await
        .expect("Failed to send booking");
    assert_eq!(missing_response.status(), 400);

    // Step 5: Filter bookings by email
    println!("\n📋 Step 5: Listing bookings by email...");
    let list_response = client
        .get(format!("{}/v1/bookings", API_BASE_URL))
        .query(&[("email", email.as_str())])
        .send()
        .await
        .expect("Failed to list bookings");

    assert_eq!(list_response.status(), 200);
    let bookings: ListResponse<Booking> =
        list_response.json().await.expect("Failed to parse bookings");
    assert_eq!(bookings.data.len(), 1);
    assert_eq!(bookings.data[0].id, booking.id);
    println!("✅ Found booking by email");

    println!("\n🎉 All booking tests passed!");
}

#[tokio::test]
#[ignore]
async fn test_validation_error_shape() {
    let client = reqwest::Client::new();

    println!("🧪 Testing validation error shape...");

    // Booking with a bad email reports the field and the fixed message.
    let response = client
        .post(format!("{}/v1/bookings", API_BASE_URL))
        .json(&json!({
            "event": uuid::Uuid::new_v4(),
            "email": "not-an-email"
        }))
        .send()
        .await
        .expect("Failed to send booking");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    println!("Validation response: {}", body);
    assert_eq!(body["code"], "VALIDATION");
    let details = body["details"].as_array().expect("details should be an array");
    assert!(details.iter().any(|d| {
        d["field"] == "email" && d["message"] == "Please provide a valid email address"
    }));
    println!("✅ Validation errors carry field and message");
}

#[tokio::test]
#[ignore]
async fn test_unknown_slug_is_not_found() {
    let client = reqwest::Client::new();

    println!("🧪 Testing unknown slug...");
    let response = client
        .get(format!(
            "{}/v1/events/slug/no-such-event-{}",
            API_BASE_URL,
            uuid::Uuid::new_v4().simple()
        ))
        .send()
        .await
        .expect("Failed to get event");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], "NOT_FOUND");
    println!("✅ Unknown slug is a 404");
}

#[tokio::test]
#[ignore]
async fn test_health_endpoint() {
    let client = reqwest::Client::new();

    println!("🏥 Testing health endpoint...");
    let response = client
        .get(format!("{}/health", API_BASE_URL))
        .send()
        .await
        .expect("Failed to call health endpoint");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    println!("✅ Health check: {:?}", body);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_openapi_spec() {
    let client = reqwest::Client::new();

    println!("📖 Testing OpenAPI spec endpoint...");
    let response = client
        .get(format!("{}/api-doc/openapi.json", API_BASE_URL))
        .send()
        .await
        .expect("Failed to get OpenAPI spec");

    assert_eq!(response.status(), 200);
    let spec: serde_json::Value = response.json().await.expect("Failed to parse spec");
    println!("✅ OpenAPI spec title: {}", spec["info"]["title"]);
    assert_eq!(spec["info"]["title"], "DevEvent API");
}
