//! Application context: the store and the console, held for one session.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::ConsoleError;
use crate::handlers;
use crate::menu;
use crate::store::AirlineStore;

pub struct App<S, R, W> {
    store: S,
    console: Console<R, W>,
}

impl<S, R, W> App<S, R, W>
where
    S: AirlineStore,
    R: BufRead,
    W: Write,
{
    pub fn new(store: S, console: Console<R, W>) -> Self {
        App { store, console }
    }

    /// Run the menu until Exit or end of input, then release the store.
    ///
    /// The store is cleaned up exactly once, whatever the loop returned.
    pub fn run(self) -> Result<(), ConsoleError> {
        let App { mut store, mut console } = self;

        let outcome = menu::run_menu(&mut console, |choice, console| {
            handlers::dispatch(choice, &mut store, console)
        });

        let farewell = write!(console.output(), "Disconnecting from database...")
            .and_then(|_| console.output().flush());
        store.cleanup();
        let farewell = farewell.and_then(|_| writeln!(console.output(), "Done\n\nBye !"));

        outcome?;
        farewell?;
        Ok(())
    }
}
