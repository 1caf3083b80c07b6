/// Absolute path of a file in the `ressources/tests` directory of the crate.
///
/// The argument must start with a `/`, e.g. `test_ressource!("/1crn.pdb")`.
#[macro_export]
macro_rules! test_ressource {
    ($fname:expr) => {
        concat!(env!("CARGO_MANIFEST_DIR"), "/ressources/tests", $fname)
    };
}
