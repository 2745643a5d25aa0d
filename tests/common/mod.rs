//! Shared fixtures: an in-memory store and a scripted console.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Cursor;
use std::rc::Rc;

use airline_ops::{
    AirlineStore, App, Console, ConsoleError, DbError, NewFlight, NewPilot, NewPlane,
    NewReservation, NewTechnician, QueryExecutor, ResultSet, SqlParam,
};

/// Everything the store was asked to do, readable after the store is consumed.
#[derive(Debug, Default)]
pub struct StoreLog {
    pub updates: Vec<(String, Vec<SqlParam>)>,
    pub queries: Vec<(String, Vec<SqlParam>)>,
    pub planes: Vec<NewPlane>,
    pub pilots: Vec<NewPilot>,
    pub flights: Vec<NewFlight>,
    pub technicians: Vec<NewTechnician>,
    pub reservations: Vec<NewReservation>,
    pub cleanups: usize,
}

/// Store that answers queries from a script and hands out increasing keys.
pub struct MemoryStore {
    log: Rc<RefCell<StoreLog>>,
    results: VecDeque<ResultSet>,
    next_key: i32,
    fail_inserts: bool,
}

impl MemoryStore {
    pub fn new() -> (Self, Rc<RefCell<StoreLog>>) {
        let log = Rc::new(RefCell::new(StoreLog::default()));
        let store = MemoryStore {
            log: Rc::clone(&log),
            results: VecDeque::new(),
            next_key: 0,
            fail_inserts: false,
        };
        (store, log)
    }

    /// Results returned by successive queries; an exhausted script yields empty results.
    pub fn with_results(mut self, results: Vec<ResultSet>) -> Self {
        self.results = results.into();
        self
    }

    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }

    fn next_key(&mut self) -> Result<i32, DbError> {
        if self.fail_inserts {
            return Err(DbError::Query(diesel::result::Error::NotFound));
        }
        self.next_key += 1;
        Ok(self.next_key)
    }
}

impl QueryExecutor for MemoryStore {
    fn execute_update(&mut self, sql: &str, params: &[SqlParam]) -> Result<usize, DbError> {
        self.log.borrow_mut().updates.push((sql.to_string(), params.to_vec()));
        Ok(1)
    }

    fn fetch(&mut self, query: &str, params: &[SqlParam]) -> Result<ResultSet, DbError> {
        self.log.borrow_mut().queries.push((query.to_string(), params.to_vec()));
        Ok(self.results.pop_front().unwrap_or_default())
    }
}

impl AirlineStore for MemoryStore {
    fn insert_plane(&mut self, new: &NewPlane) -> Result<i32, DbError> {
        let key = self.next_key()?;
        self.log.borrow_mut().planes.push(new.clone());
        Ok(key)
    }

    fn insert_pilot(&mut self, new: &NewPilot) -> Result<i32, DbError> {
        let key = self.next_key()?;
        self.log.borrow_mut().pilots.push(new.clone());
        Ok(key)
    }

    fn insert_flight(&mut self, new: &NewFlight) -> Result<i32, DbError> {
        let key = self.next_key()?;
        self.log.borrow_mut().flights.push(new.clone());
        Ok(key)
    }

    fn insert_technician(&mut self, new: &NewTechnician) -> Result<i32, DbError> {
        let key = self.next_key()?;
        self.log.borrow_mut().technicians.push(new.clone());
        Ok(key)
    }

    fn insert_reservation(&mut self, new: &NewReservation) -> Result<i32, DbError> {
        let key = self.next_key()?;
        self.log.borrow_mut().reservations.push(new.clone());
        Ok(key)
    }

    fn cleanup(self) {
        self.log.borrow_mut().cleanups += 1;
    }
}

/// Build a result set from string literals.
pub fn table(columns: &[&str], rows: &[&[&str]]) -> ResultSet {
    ResultSet::new(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect(),
    )
}

pub fn scripted_console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn output_of(console: &mut Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.output().clone()).expect("console output is UTF-8")
}

/// Run a whole session over `input` and return what was printed.
pub fn run_app(store: MemoryStore, input: &str) -> (String, Result<(), ConsoleError>) {
    let mut out = Vec::new();
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), &mut out);
    let result = App::new(store, console).run();
    (String::from_utf8(out).expect("console output is UTF-8"), result)
}
