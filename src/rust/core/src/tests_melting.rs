// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto

//! Melting Kernel Tests
//!
//! End-to-end checks through the JSON facade, the way the host application
//! and the CLI drive the kernel.

use crate::melting_kernel::MeltingKernel;
use serde_json::{json, Value};

fn request(time: f64, extra: Value) -> String {
    let mut base = json!({
        "config": {
            "temperature_time_step": 1.0,
            "temperature_num_step": 3,
            "residual_stiffness": 0.1,
            "mushy_stiffness": 0.5
        },
        "crystal": { "c11": 204.6, "c12": 137.7, "c44": 126.2 },
        "temperatures": {
            "1": [600.0, 700.0, 800.0],
            "2": [1600.0, 1660.0, 1700.0],
            "3": [2500.0, 2600.0, 2700.0]
        },
        "time": time
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    base.to_string()
}

fn compute(request_json: &str) -> Value {
    serde_json::from_str(&MeltingKernel::compute_field(request_json)).unwrap()
}

#[test]
fn test_field_paths_and_phases() {
    let response = compute(&request(0.5, json!({})));
    let points = response["points"].as_array().unwrap();
    assert_eq!(points.len(), 3);

    // element 1: solid throughout
    assert_eq!(points[0]["point"]["element"], 1);
    assert_eq!(points[0]["path"], "temperature_only");
    assert_eq!(points[0]["window"]["current"]["phase"], "solid");

    // element 2: solid -> mushy
    assert_eq!(points[1]["path"]["degraded"], "melting");
    assert_eq!(points[1]["window"]["next"]["phase"], "mushy");

    // element 3: above the liquidus, clamped into the mushy zone
    assert_eq!(points[2]["path"]["degraded"], "mushy_hold");
    assert_eq!(points[2]["window"]["current"]["temperature"], 1673.15);

    let c11 = points[2]["stiffness"][0][0].as_f64().unwrap();
    assert!((c11 - 0.5 * 204.6).abs() < 1e-9, "mushy C11 {}", c11);

    assert!(points[0]["rotated"].is_null());
}

#[test]
fn test_melting_blend_values() {
    let response = compute(&request(0.5, json!({ "points": [{ "element": 2, "qp": 4 }] })));
    let point = &response["points"][0];
    assert_eq!(point["point"]["qp"], 4);
    assert_eq!(point["bracket"]["step_index"], 0);
    assert_eq!(point["bracket"]["fraction"], 0.5);

    // C44 at 1600 K with the default zero slopes is the baseline value
    let c44 = point["stiffness"][3][3].as_f64().unwrap();
    let expected = 0.5 * 126.2 + 0.5 * 0.5 * 126.2;
    assert!((c44 - expected).abs() < 1e-9, "C44 {} expected {}", c44, expected);
}

#[test]
fn test_orientations_and_mushy_field() {
    let response = compute(&request(
        1.0,
        json!({
            "orientations": { "1": { "phi1": 45.0, "Phi": 0.0, "phi2": 0.0 } },
            "mushy_stiffness_field": { "3": 0.25 }
        }),
    ));
    let points = response["points"].as_array().unwrap();

    let rotated_c11 = points[0]["rotated"][0][0].as_f64().unwrap();
    assert!((rotated_c11 - ((204.6 + 137.7) / 2.0 + 126.2)).abs() < 1e-9);

    let mushy_c11 = points[2]["stiffness"][0][0].as_f64().unwrap();
    assert!((mushy_c11 - 0.25 * 204.6).abs() < 1e-9);
}

#[test]
fn test_events() {
    let response = compute(&request(50.0, json!({})));
    let topics: Vec<&str> = response["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["topic"].as_str())
        .collect();
    assert!(topics.contains(&"MELT.HISTORY"));
    assert!(topics.contains(&"MELT.DEGRADATION"));
    assert!(!topics.contains(&"MELT.THRESHOLDS"));
    assert!(response["compute_time_ms"].as_f64().unwrap() >= 0.0);
}

#[test]
fn test_malformed_thresholds_reported_not_rejected() {
    let response = compute(&request(
        0.0,
        json!({
            "config": {
                "temperature_num_step": 3,
                "melting_temperature_low": 200.0,
                "melting_temperature_high": 250.0
            }
        }),
    ));
    assert!(response.get("error").is_none(), "{}", response);
    let topics: Vec<&str> = response["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["topic"].as_str())
        .collect();
    assert!(topics.contains(&"MELT.THRESHOLDS"));
}

#[test]
fn test_error_objects() {
    let bad_json = compute("{ not json");
    assert!(bad_json["error"].as_str().unwrap().starts_with("invalid request"));

    let short_history = compute(&request(0.0, json!({ "temperatures": { "1": [600.0] } })));
    assert!(short_history["error"].as_str().unwrap().contains("no temperature sample 1"));

    let bad_config = compute(&request(0.0, json!({ "config": { "temperature_num_step": 1 } })));
    assert!(bad_config["error"].as_str().unwrap().contains("at least two samples"));
}
