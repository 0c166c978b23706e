/*
This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
If a copy of the MPL was not distributed with this file,
You can obtain one at https://mozilla.org/MPL/2.0/.
*/

pub mod attack_in_proximity;
pub mod errors;
pub mod events;
pub mod follow;
pub mod location;
pub mod nodes;
pub mod status;
pub mod store;
pub mod task_runtime;
pub mod tree;
pub mod types;
