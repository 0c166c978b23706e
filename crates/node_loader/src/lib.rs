/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/

//! This crate extends the Feral game AI library with a solution for loading authored Node
//! definitions (e.g. a wolf's `CheckProximityAttackStop` with its `max_distance`) from any
//! available Bevy [`AssetSource`](https://docs.rs/bevy/latest/bevy/asset/io/struct.AssetSource.html).
//!
//! Which file formats are understood depends on the enabled `*_support` features.

mod loader;

pub use loader::*;
