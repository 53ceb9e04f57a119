//! Built-in fixture records for local development.

use serde_json::{Value, json};

/// A few records per registered entity type. One hotel is locked so bulk
/// deletes can fail part-way.
pub fn default_seed() -> Value {
    json!({
        "users": [
            { "_id": "u-100", "name": "Ana Ribeiro", "email": "ana@trips.test", "mobile": "+351 910 000 100", "country": "Portugal", "type": "admin" },
            { "_id": "u-101", "name": "Tom Becker", "email": "tom@trips.test", "mobile": "+49 151 000 101", "country": "Germany", "type": "owner" },
            { "_id": "u-102", "name": "Mei Lin", "email": "mei@trips.test", "mobile": "+65 8000 0102", "country": "Singapore", "type": "customer" }
        ],
        "hotels": [
            { "_id": "h-200", "name": "Seaside Alfama", "type": "boutique", "country": "Portugal", "ownerName": "Tom Becker", "price": 145.0 },
            { "_id": "h-201", "name": "Alpine Lodge", "type": "chalet", "country": "Austria", "ownerName": "Tom Becker", "price": 210.0 },
            { "_id": "h-202", "name": "Harbour View", "type": "resort", "country": "Singapore", "ownerName": "Mei Lin", "price": 320.0, "locked": true }
        ],
        "tours": [
            { "_id": "t-300", "name": "Douro Valley Wine Day", "country": "Portugal", "duration": 1, "price": 89.0 },
            { "_id": "t-301", "name": "Tyrol Summit Trek", "country": "Austria", "duration": 3, "price": 260.0 }
        ],
        "vehicle": [
            { "_id": "v-400", "name": "Coastal Cruiser", "vehicleType": "convertible", "ownerName": "Ana Ribeiro", "price": 75.0 },
            { "_id": "v-401", "name": "Mountain 4x4", "vehicleType": "SUV", "ownerName": "Tom Becker", "price": 95.0 }
        ],
        "restaurant": [
            { "_id": "r-500", "name": "Tasca do Rio", "type": "portuguese", "country": "Portugal", "mobile": "+351 210 000 500" },
            { "_id": "r-501", "name": "Hawker Lane", "type": "street food", "country": "Singapore", "mobile": "+65 6000 0501" }
        ]
    })
}
