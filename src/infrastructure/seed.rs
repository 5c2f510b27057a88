//! Reference data shared by the migrations and the in-memory store

use crate::domain::ReceptionStatusKind;

pub const CITIES: [(i32, &str); 3] = [(1, "Москва"), (2, "Санкт-Петербург"), (3, "Казань")];

pub const PRODUCT_TYPES: [(i32, &str); 3] = [(1, "электроника"), (2, "одежда"), (3, "обувь")];

pub const IN_PROGRESS_STATUS_ID: i32 = 1;
pub const CLOSED_STATUS_ID: i32 = 2;

pub const RECEPTION_STATUSES: [(i32, ReceptionStatusKind); 2] = [
    (IN_PROGRESS_STATUS_ID, ReceptionStatusKind::InProgress),
    (CLOSED_STATUS_ID, ReceptionStatusKind::Closed),
];
