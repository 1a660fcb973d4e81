// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod browser;
pub mod contacts;
pub mod forms;
pub mod ids;
pub mod model;
pub mod notify;
pub mod present;
pub mod repo;
pub mod state;

pub use browser::*;
pub use contacts::*;
pub use forms::*;
pub use ids::*;
pub use model::*;
pub use notify::*;
pub use present::*;
pub use repo::*;
pub use state::*;
