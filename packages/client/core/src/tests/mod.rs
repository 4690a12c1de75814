
mod wizard_tests;
mod session_tests;
mod navigation_tests;
