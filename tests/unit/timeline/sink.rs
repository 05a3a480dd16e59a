use super::*;

fn pair(param: &str, start_s: f64, end_s: f64, vi: f64, vf: f64) -> KeyframePair {
    KeyframePair {
        target: KeyTarget {
            instance: InstanceId(3),
            param: param.to_string(),
        },
        start_s,
        end_s,
        value_initial: Value::Scalar(vi),
        value_final: Value::Scalar(vf),
        ease: Ease::Linear,
    }
}

#[test]
fn recording_sink_flattens_pairs_into_ordered_writes() {
    let mut sink = RecordingSink::new();
    sink.keyframe_pair(&pair("fold", 0.0, 1.0, 0.0, 1.0)).unwrap();
    sink.keyframe_pair(&pair("spread", 1.0, 2.0, 40.0, 10.0)).unwrap();
    assert_eq!(sink.pairs().len(), 2);

    let writes = sink.writes();
    assert_eq!(writes.len(), 4);
    assert_eq!(writes[0].target.param, "fold");
    assert_eq!(writes[0].time_s, 0.0);
    assert_eq!(writes[0].value, Value::Scalar(0.0));
    assert_eq!(writes[1].time_s, 1.0);
    assert_eq!(writes[1].value, Value::Scalar(1.0));
    assert_eq!(writes[2].target.param, "spread");
    assert_eq!(writes[3].value, Value::Scalar(10.0));
}

#[test]
fn json_lines_sink_writes_one_object_per_pair() {
    let mut sink = JsonLinesSink::new(Vec::new());
    sink.keyframe_pair(&pair("fold", 0.0, 0.5, 0.0, 1.0)).unwrap();
    sink.keyframe_pair(&pair("spread", 0.5, 1.0, 40.0, 10.0)).unwrap();

    let raw = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["target"]["instance"], 3);
    assert_eq!(first["target"]["param"], "fold");
    assert_eq!(first["start_s"], 0.0);
    assert_eq!(first["end_s"], 0.5);
    assert_eq!(first["value_initial"], serde_json::json!({"scalar": 0.0}));
    assert_eq!(first["value_final"], serde_json::json!({"scalar": 1.0}));
    assert_eq!(first["ease"], "Linear");

    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["target"]["param"], "spread");
}
