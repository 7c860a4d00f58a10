// Copyright @yucwang 2026

pub mod obj_utils;
