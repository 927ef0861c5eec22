pub mod choice;
pub mod fill;
pub mod generator;
pub mod iterate;
pub mod prompts;
pub mod registry;
pub mod remote;
pub mod scaffold;
