//! Main menu: selections, the loop state, and the read/dispatch loop.

use std::io::{BufRead, Write};

use crate::console::Console;
use crate::error::ConsoleError;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddPlane,
    AddPilot,
    AddFlight,
    AddTechnician,
    BookFlight,
    ListNumberOfAvailableSeats,
    ListTotalNumberOfRepairsPerPlane,
    ListTotalNumberOfRepairsPerYear,
    FindPassengersCountWithStatus,
    Exit,
}

impl MenuChoice {
    /// All entries in display order.
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::AddPlane,
        MenuChoice::AddPilot,
        MenuChoice::AddFlight,
        MenuChoice::AddTechnician,
        MenuChoice::BookFlight,
        MenuChoice::ListNumberOfAvailableSeats,
        MenuChoice::ListTotalNumberOfRepairsPerPlane,
        MenuChoice::ListTotalNumberOfRepairsPerYear,
        MenuChoice::FindPassengersCountWithStatus,
        MenuChoice::Exit,
    ];

    /// Map a typed number to its entry. Unmapped numbers yield `None`.
    pub fn from_selection(selection: i64) -> Option<Self> {
        if selection < 1 {
            return None;
        }
        Self::ALL.get((selection - 1) as usize).copied()
    }

    pub fn selection(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map_or(0, |index| index + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::AddPlane => "Add Plane",
            MenuChoice::AddPilot => "Add Pilot",
            MenuChoice::AddFlight => "Add Flight",
            MenuChoice::AddTechnician => "Add Technician",
            MenuChoice::BookFlight => "Book Flight",
            MenuChoice::ListNumberOfAvailableSeats => {
                "List number of available seats for a given flight."
            }
            MenuChoice::ListTotalNumberOfRepairsPerPlane => {
                "List total number of repairs per plane in descending order"
            }
            MenuChoice::ListTotalNumberOfRepairsPerYear => {
                "List total number of repairs per year in ascending order"
            }
            MenuChoice::FindPassengersCountWithStatus => {
                "Find total number of passengers with a given status"
            }
            MenuChoice::Exit => "< EXIT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exiting,
}

pub fn write_menu<W: Write + ?Sized>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "MAIN MENU")?;
    writeln!(out, "---------")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}. {}", choice.selection(), choice.label())?;
    }
    Ok(())
}

/// Show the menu and dispatch selections until Exit is chosen or input ends.
///
/// `dispatch` is called once per selection of entries 1 to 9. Handler
/// failures are the dispatcher's business; only console failures end the loop
/// with an error.
pub fn run_menu<R, W, F>(console: &mut Console<R, W>, mut dispatch: F) -> Result<(), ConsoleError>
where
    R: BufRead,
    W: Write,
    F: FnMut(MenuChoice, &mut Console<R, W>),
{
    let mut state = MenuState::Running;

    while state == MenuState::Running {
        write_menu(console.output())?;

        let selection = match console.read_choice() {
            Ok(selection) => selection,
            Err(ConsoleError::Eof) => {
                tracing::info!("Input closed, leaving the menu");
                break;
            }
            Err(e) => return Err(e),
        };

        match MenuChoice::from_selection(selection) {
            Some(MenuChoice::Exit) => state = MenuState::Exiting,
            Some(choice) => {
                tracing::debug!("Menu selection {}: {:?}", selection, choice);
                dispatch(choice, console);
            }
            None => tracing::debug!("Ignoring unmapped selection {}", selection),
        }
    }

    Ok(())
}
