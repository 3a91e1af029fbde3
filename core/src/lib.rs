// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Casona core: the event and user model, form validation, repositories over
//! the remote document store, and observable view-model stores.

mod backend;
mod casona;
mod config;
mod credentials;
mod event;
mod fields;
mod form;
mod repository;
mod state;
mod store;
mod user;

pub use crate::backend::{AuthProvider, DocumentStore};
pub use crate::casona::Casona;
pub use crate::config::{APP_NAME, Config};
pub use crate::credentials::CredentialCache;
pub use crate::event::{EVENTS, Event};
pub use crate::form::{EventForm, UserForm, validate_event, validate_user};
pub use crate::repository::{EventRepository, UserRepository};
pub use crate::state::SessionFile;
pub use crate::store::{
    CrudMessages, CrudRepository, CrudState, CrudStore, Entity, EventStore, Loadable, Observable,
    ProfileState, ProfileStore, SessionState, SessionStore, UserStore,
};
pub use crate::user::{DEFAULT_BIO, DEFAULT_DISPLAY_NAME, USERS, UserProfile, UserType, email_prefix};

pub use casona_gateway::{AuthUser, Document, Fields, GatewayConfig, GatewayError, Session, Value};
