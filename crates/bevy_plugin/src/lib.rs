/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/

//! This crate extends the Feral game AI library with a plugin that streamlines the integration
//! of Feral into an existing Bevy application.
//!
//! The plugin handles the basic gruntwork - registering the reflected Components, setting up the
//! runtime config Resource and scheduling the System that ticks behavior Tasks.
//!
//! What's left for you to do after adding it in is giving your actors `BehaviorTask`s
//! (or wiring the Nodes into your own tree executor) and reacting to `UpdateBehavior`.

mod plugin;

pub use plugin::FeralPlugin;
