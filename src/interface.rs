/// Behaviour for emitting text to the invoking user.
///
/// Hosts embed this at the edge: help documents and error messages go through a
/// `UserInterface` so that the core stays silent and testable.
pub trait UserInterface {
    /// Emit a regular message.
    fn print(&self, message: String);

    /// Emit an error message.
    fn print_error(&self, error: String);
}

/// The standard out/err implementation.
#[derive(Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: String) {
        eprintln!("{error}");
    }
}
