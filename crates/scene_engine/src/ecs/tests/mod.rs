//! Scenario tests for the world, spanning entities, systems and scene loading

mod fixtures;
