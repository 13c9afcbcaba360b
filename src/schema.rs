table! {
    users (username) {
        username -> Text,
        first_name -> Text,
        last_name -> Text,
        phone -> Text,
        joined_at -> Timestamp,
    }
}

table! {
    messages (id) {
        id -> Integer,
        from_username -> Text,
        to_username -> Text,
        body -> Text,
        sent_at -> Timestamp,
        read_at -> Nullable<Timestamp>,
    }
}

allow_tables_to_appear_in_same_query!(users, messages);
