// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod dates;
pub mod db;
pub mod error;
pub mod ids;
pub mod legacy;
pub mod migrations;
pub mod models;
pub mod store;
pub mod summary;
pub mod utils;
