//! Typed inserts for the airline tables.
//!
//! Each insert returns the key the database generated for the new row,
//! taken from the INSERT's own `RETURNING` clause. Reading `MAX(id)`
//! afterwards would race with other sessions.

use diesel::prelude::*;

use crate::database::Database;
use crate::error::DbError;
use crate::executor::QueryExecutor;
use crate::models::*;

/// Everything the menu handlers need from the database session.
pub trait AirlineStore: QueryExecutor {
    fn insert_plane(&mut self, new: &NewPlane) -> Result<i32, DbError>;

    fn insert_pilot(&mut self, new: &NewPilot) -> Result<i32, DbError>;

    fn insert_flight(&mut self, new: &NewFlight) -> Result<i32, DbError>;

    fn insert_technician(&mut self, new: &NewTechnician) -> Result<i32, DbError>;

    fn insert_reservation(&mut self, new: &NewReservation) -> Result<i32, DbError>;

    /// Release the session. Called exactly once, when the menu loop ends.
    fn cleanup(self)
    where
        Self: Sized;
}

// ============================================================================
// PostgreSQL implementation
// ============================================================================

impl AirlineStore for Database {
    fn insert_plane(&mut self, new: &NewPlane) -> Result<i32, DbError> {
        use crate::schema::plane::dsl::*;

        let key = diesel::insert_into(plane)
            .values(new)
            .returning(id)
            .get_result::<i32>(self.connection())?;
        Ok(key)
    }

    fn insert_pilot(&mut self, new: &NewPilot) -> Result<i32, DbError> {
        use crate::schema::pilot::dsl::*;

        let key = diesel::insert_into(pilot)
            .values(new)
            .returning(id)
            .get_result::<i32>(self.connection())?;
        Ok(key)
    }

    fn insert_flight(&mut self, new: &NewFlight) -> Result<i32, DbError> {
        use crate::schema::flight::dsl::*;

        let key = diesel::insert_into(flight)
            .values(new)
            .returning(fnum)
            .get_result::<i32>(self.connection())?;
        Ok(key)
    }

    fn insert_technician(&mut self, new: &NewTechnician) -> Result<i32, DbError> {
        use crate::schema::technician::dsl::*;

        let key = diesel::insert_into(technician)
            .values(new)
            .returning(id)
            .get_result::<i32>(self.connection())?;
        Ok(key)
    }

    fn insert_reservation(&mut self, new: &NewReservation) -> Result<i32, DbError> {
        use crate::schema::reservation::dsl::*;

        let key = diesel::insert_into(reservation)
            .values(new)
            .returning(rnum)
            .get_result::<i32>(self.connection())?;
        Ok(key)
    }

    fn cleanup(self) {
        Database::cleanup(self)
    }
}
