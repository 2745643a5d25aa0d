// Tables this program writes through Diesel. The schema itself is owned by
// the database; these definitions only have to agree with it.

diesel::table! {
    plane (id) {
        id -> Int4,
        make -> Text,
        model -> Text,
        age -> Int4,
        seats -> Int4,
    }
}

diesel::table! {
    pilot (id) {
        id -> Int4,
        fullname -> Text,
        nationality -> Text,
    }
}

diesel::table! {
    flight (fnum) {
        fnum -> Int4,
        cost -> Int4,
        num_sold -> Int4,
        num_stops -> Int4,
        actual_departure_date -> Date,
        actual_arrival_date -> Date,
        arrival_airport -> Text,
        departure_airport -> Text,
    }
}

diesel::table! {
    technician (id) {
        id -> Int4,
        full_name -> Text,
    }
}

diesel::table! {
    reservation (rnum) {
        rnum -> Int4,
        cid -> Int4,
        fid -> Int4,
        status -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(plane, pilot, flight, technician, reservation,);
