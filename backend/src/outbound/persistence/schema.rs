//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    games (id) {
        id -> Integer,
        title -> Text,
        genre -> Text,
        description -> Text,
        image -> Text,
        category -> Text,
        cta_text -> Text,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    site_content (id) {
        id -> Integer,
        content_key -> Text,
        content_value -> Text,
        content_type -> Text,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    admin_users (id) {
        id -> Integer,
        username -> Text,
        password_hash -> Text,
        created_at -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(games, site_content, admin_users);
