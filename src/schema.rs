// Kept in sync with sql/schema.sql by hand.

diesel::table! {
    cards (id) {
        id -> Text,
        word -> Text,
        translation -> Text,
        definition -> Nullable<Text>,
        meta -> Nullable<Text>,
        pronunciation -> Nullable<Text>,
        example -> Nullable<Text>,
        example_translation -> Nullable<Text>,
        created_at -> Timestamp,
    }
}

diesel::table! {
    history (id) {
        id -> Integer,
        username -> Text,
        card_id -> Text,
        answer -> Bool,
        created_at -> Timestamp,
    }
}

diesel::table! {
    limits (id) {
        id -> Integer,
        username -> Text,
        new_limit -> BigInt,
        due_limit -> BigInt,
        day -> Date,
    }
}

diesel::table! {
    schedules (id) {
        id -> Integer,
        username -> Text,
        card_id -> Text,
        ease -> Double,
        due -> Nullable<Timestamp>,
        interval_min -> Nullable<Integer>,
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    users (username) {
        username -> Text,
        password -> Text,
        bonus -> Double,
        punishment -> Double,
        new_limit -> Integer,
        due_limit -> Integer,
    }
}

diesel::joinable!(schedules -> cards (card_id));
diesel::joinable!(schedules -> users (username));

diesel::allow_tables_to_appear_in_same_query!(
    cards,
    history,
    limits,
    schedules,
    users,
);
