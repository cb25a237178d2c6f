//! Sample rows for demos and report tests.
//!
//! Listings and claims resolve their foreign ids by name, so the seed works
//! regardless of where the id sequences currently stand.

use crate::error::DataResult;
use crate::DbPool;

const PROVIDERS: &str = "INSERT INTO providers \
    (name, provider_type, contact, email, phone, city, address) VALUES \
    ('Green Grocery Store', 'Grocery Store', 'John Smith', 'john@greengrocery.com', '123-456-7890', 'New Jessica', '123 Main St'), \
    ('Bella Restaurant', 'Restaurant', 'Maria Garcia', 'maria@bella.com', '123-456-7891', 'Springfield', '456 Oak Ave'), \
    ('Fresh Bakery', 'Bakery', 'David Lee', 'david@freshbakery.com', '123-456-7892', 'New Jessica', '789 Pine St'), \
    ('Hotel Paradise', 'Hotel', 'Sarah Johnson', 'sarah@paradise.com', '123-456-7893', 'Downtown', '321 Elm St'), \
    ('Corner Cafe', 'Cafe', 'Mike Brown', 'mike@cornercafe.com', '123-456-7894', 'Springfield', '654 Maple Ave')";

const RECEIVERS: &str = "INSERT INTO receivers \
    (name, organization_type, contact, email, phone, city, address) VALUES \
    ('Food for All NGO', 'NGO', 'Lisa Wilson', 'lisa@foodforall.org', '123-555-0001', 'New Jessica', '100 Charity Lane'), \
    ('Community Kitchen', 'Community Center', 'Robert Davis', 'robert@communitykitchen.org', '123-555-0002', 'Springfield', '200 Help St'), \
    ('City School District', 'School', 'Jennifer Taylor', 'jennifer@cityschools.edu', '123-555-0003', 'Downtown', '300 Education Blvd'), \
    ('Helping Hands Charity', 'Charity', 'Michael Anderson', 'michael@helpinghands.org', '123-555-0004', 'New Jessica', '400 Care Ave'), \
    ('Individual Volunteer', 'Individual', 'Emily Rodriguez', 'emily@email.com', '123-555-0005', 'Springfield', '500 Volunteer St')";

const FOOD_LISTINGS: &str = "INSERT INTO food_listings \
    (provider_id, provider_type, food_name, food_type, meal_type, quantity, unit, location, expiry_date, description) \
    SELECT p.id, p.provider_type, v.food_name, v.food_type, v.meal_type, v.quantity, v.unit, v.location, \
           CURRENT_DATE + v.days_to_expiry, v.description \
    FROM (VALUES \
        ('Green Grocery Store', 'Fresh Apples', 'Fruits', 'Snack', 50.0::float8, 'kg', 'New Jessica', 3, 'Organic red apples'), \
        ('Green Grocery Store', 'Bread Loaves', 'Bakery', 'Other', 25.0::float8, 'pieces', 'New Jessica', 1, 'Day-old bread'), \
        ('Bella Restaurant', 'Pasta Dishes', 'Prepared Food', 'Lunch', 30.0::float8, 'servings', 'Springfield', 2, 'Leftover pasta'), \
        ('Fresh Bakery', 'Croissants', 'Bakery', 'Breakfast', 20.0::float8, 'pieces', 'New Jessica', 1, 'Fresh croissants'), \
        ('Hotel Paradise', 'Vegetable Soup', 'Prepared Food', 'Dinner', 40.0::float8, 'servings', 'Downtown', 2, 'Homemade soup') \
    ) AS v(provider_name, food_name, food_type, meal_type, quantity, unit, location, days_to_expiry, description) \
    JOIN providers p ON p.name = v.provider_name";

const CLAIMS: &str = "INSERT INTO claims \
    (food_id, receiver_id, claimed_quantity, status, pickup_time, notes) \
    SELECT f.id, r.id, v.claimed_quantity, v.status, \
           NOW() + make_interval(hours => v.pickup_in_hours), v.notes \
    FROM (VALUES \
        ('Fresh Apples', 'Food for All NGO', 25.0::float8, 'Completed', 1, 'Picked up successfully'), \
        ('Bread Loaves', 'Community Kitchen', 15.0::float8, 'Approved', 2, 'Will pick up this afternoon'), \
        ('Pasta Dishes', 'City School District', 30.0::float8, 'Pending', NULL, 'Requested for school lunch program'), \
        ('Croissants', 'Food for All NGO', 10.0::float8, 'Completed', -1, 'Great for breakfast program') \
    ) AS v(food_name, receiver_name, claimed_quantity, status, pickup_in_hours, notes) \
    JOIN food_listings f ON f.food_name = v.food_name \
    JOIN receivers r ON r.name = v.receiver_name";

/// Insert the sample rows if the providers table is empty.
///
/// Returns `true` if rows were inserted, `false` if data already existed.
pub async fn seed_sample_data(pool: &DbPool) -> DataResult<bool> {
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM providers")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Providers present, skipping sample data");
        return Ok(false);
    }

    for (table, statement) in [
        ("providers", PROVIDERS),
        ("receivers", RECEIVERS),
        ("food_listings", FOOD_LISTINGS),
        ("claims", CLAIMS),
    ] {
        let result = sqlx::query(statement).execute(pool).await?;
        tracing::info!(table, rows = result.rows_affected(), "Inserted sample rows");
    }
    Ok(true)
}
