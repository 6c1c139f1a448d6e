// Operation suites shared by sequential and parallel streams.

use std::collections::VecDeque;

use streamforge_test::sequence::Ranked;

use super::*;

#[test]
fn test_collect() {
    for_each_factory(|name, stream| {
        for len in 0..=10 {
            let elements: Vec<i32> = (1..=len).collect();
            let mut result = vec![99];
            stream(elements.clone()).collect_into(&mut result).unwrap();
            assert_eq!(result, elements, "{name}: {len} elements");
        }
    });
}

#[test]
fn test_collect_into_wrong_shapes() {
    for_each_factory(|name, stream| {
        let mut single = 0i32;
        let err = stream(vec![1, 2, 3]).collect_any(&mut single).unwrap_err();
        assert!(matches!(err, StreamError::DestinationType { .. }), "{name}");

        let mut units: Vec<()> = Vec::new();
        assert!(stream(vec![1, 2, 3]).collect_any(&mut units).is_err(), "{name}");

        let mut strings: Vec<String> = vec!["keep".to_string()];
        assert!(stream(vec![1]).collect_any(&mut strings).is_err(), "{name}");
        assert_eq!(strings, vec!["keep"], "{name}: no partial write");
    });
}

#[test]
fn test_collect_any_into_sequences() {
    for_each_factory(|name, stream| {
        let mut vec: Vec<i32> = vec![7];
        stream(vec![1, 2]).collect_any(&mut vec).unwrap();
        assert_eq!(vec, vec![1, 2], "{name}");

        let mut deque: VecDeque<i32> = VecDeque::new();
        stream(vec![3, 4]).collect_any(&mut deque).unwrap();
        assert_eq!(deque, VecDeque::from(vec![3, 4]), "{name}");

        let mut cleared: Vec<i32> = vec![1, 2, 3];
        stream(Vec::new()).collect_any(&mut cleared).unwrap();
        assert!(cleared.is_empty(), "{name}");
    });
}

#[test]
fn test_collect_into_converting_destination() {
    for_each_factory(|name, stream| {
        let mut wide: Vec<i64> = Vec::new();
        stream(vec![-5, 5]).collect_into(&mut wide).unwrap();
        assert_eq!(wide, vec![-5i64, 5], "{name}");

        let mut narrow: Vec<u8> = vec![1];
        let err = stream(vec![1, -5]).collect_into(&mut narrow).unwrap_err();
        assert!(matches!(err, StreamError::DestinationType { .. }), "{name}");
        assert_eq!(narrow, vec![1], "{name}: no partial write");
    });
}

#[test]
fn test_err_on_ready_stream() {
    for_each_factory(|name, stream| {
        assert!(stream(Vec::new()).err().is_none(), "{name}");
        assert!(!stream(vec![1]).is_failed(), "{name}");
    });
}

#[test]
fn test_filter() {
    let cases: [(&str, Vec<(Vec<i32>, Vec<i32>)>); 4] = [
        ("no element", vec![(vec![], vec![])]),
        (
            "no filtered",
            vec![
                (vec![1], vec![1]),
                (vec![1, 1], vec![1, 1]),
                (vec![1, 1, 1], vec![1, 1, 1]),
            ],
        ),
        (
            "partial filtered",
            vec![
                (vec![1, 2, 3, 4], vec![1]),
                (vec![2, 3, 1, 4], vec![1]),
                (vec![2, 3, 4, 1], vec![1]),
            ],
        ),
        (
            "all filtered",
            vec![(vec![2], vec![]), (vec![2, 3], vec![]), (vec![2, 4, 5], vec![])],
        ),
    ];
    for_each_factory(|name, stream| {
        for (case, pairs) in &cases {
            for (elements, expected) in pairs {
                let s = stream(elements.clone());
                let parallel = s.is_parallel();
                let s = s.filter(|v| *v == 1);
                assert_eq!(s.is_parallel(), parallel, "{name}: {case}");
                assert_eq!(&s.to_vec().unwrap(), expected, "{name}: {case}");
            }
        }
    });
}

#[test]
fn test_map() {
    for_each_factory(|name, stream| {
        for len in 0..=7 {
            let elements: Vec<i32> = (1..=len).collect();
            let s = stream(elements.clone());
            let parallel = s.is_parallel();
            let s = s.map(|v| v * 2);
            assert_eq!(s.is_parallel(), parallel, "{name}");
            let expected: Vec<i32> = elements.iter().map(|v| v * 2).collect();
            assert_eq!(s.to_vec().unwrap(), expected, "{name}: {len} elements");
        }
    });
}

#[test]
fn test_map_changes_type() {
    for_each_factory(|name, stream| {
        let s = stream(vec![1, 22, 333]).map(|v| v.to_string());
        assert!(s.item_tag().is::<String>(), "{name}");
        let mut dest: Vec<String> = Vec::new();
        s.collect_into(&mut dest).unwrap();
        assert_eq!(dest, vec!["1", "22", "333"], "{name}");
    });
}

#[test]
fn test_flat_map() {
    for_each_factory(|name, stream| {
        let s = stream(Vec::new());
        let parallel = s.is_parallel();
        let s = s.flat_map(|_| Stream::<i32>::failed(boom()));
        assert_eq!(s.is_parallel(), parallel, "{name}: no elements");
        assert!(s.to_vec().unwrap().is_empty(), "{name}: no elements");

        let s = stream(vec![1, 2, 3]).flat_map(|v| Stream::new_sequential(vec![v, -v]));
        assert_eq!(s.is_parallel(), parallel, "{name}: sequential nested");
        assert_eq!(s.to_vec().unwrap(), vec![1, -1, 2, -2, 3, -3], "{name}");

        let s = stream(vec![1, 2, 3]).flat_map(|v| Stream::new_parallel(vec![v, -v]));
        assert_eq!(s.is_parallel(), parallel, "{name}: parallel nested");
        assert_eq!(s.to_vec().unwrap(), vec![1, -1, 2, -2, 3, -3], "{name}");
    });
}

#[test]
fn test_flat_map_nested_error() {
    for_each_factory(|name, stream| {
        let s = stream(vec![1, 2, 3]);
        let parallel = s.is_parallel();
        let s = s.flat_map(|_| Stream::<i32>::failed(boom()));
        assert_eq!(s.is_parallel(), parallel, "{name}");
        assert_eq!(
            s.to_vec(),
            Err(StreamError::NestedStream(Box::new(boom()))),
            "{name}"
        );
    });
}

#[test]
fn test_flat_map_earliest_error_wins() {
    for_each_factory(|name, stream| {
        let s = stream((0..64).collect()).flat_map(|v| {
            if v % 10 == 9 {
                Stream::failed(StreamError::custom(format!("failed at {v}")))
            } else {
                Stream::new_sequential(vec![v])
            }
        });
        let err = s.err().cloned().unwrap();
        assert_eq!(err.root_cause(), &StreamError::custom("failed at 9"), "{name}");
    });
}

#[test]
fn test_flat_map_changes_type() {
    for_each_factory(|name, stream| {
        let words = stream(vec![2, 0, 1])
            .flat_map(|v| Stream::new_sequential(vec!["x".repeat(v as usize); v as usize]))
            .to_vec()
            .unwrap();
        assert_eq!(words, vec!["xx", "xx", "x"], "{name}");
    });
}

#[test]
fn test_sorted() {
    let sorted_cases = [
        (vec![], vec![]),
        (vec![1], vec![1]),
        (vec![1, 2], vec![1, 2]),
        (vec![1, 2, 3], vec![1, 2, 3]),
        (vec![1, 2, 3, 4, 5], vec![1, 2, 3, 4, 5]),
    ];
    let unsorted_cases = [
        (vec![1, 0], vec![0, 1]),
        (vec![0, 3, 1], vec![0, 1, 3]),
        (vec![1, 0, 3], vec![0, 1, 3]),
        (vec![1, 3, 0], vec![0, 1, 3]),
        (vec![3, 0, 1], vec![0, 1, 3]),
        (vec![3, 1, 0], vec![0, 1, 3]),
    ];
    for_each_factory(|name, stream| {
        for (elements, expected) in sorted_cases.iter().chain(unsorted_cases.iter()) {
            let s = stream(elements.clone());
            let parallel = s.is_parallel();
            let s = s.sorted(|a, b| a < b);
            assert_eq!(s.is_parallel(), parallel, "{name}");
            assert_eq!(&s.to_vec().unwrap(), expected, "{name}: {elements:?}");
        }
    });
}

#[test]
fn test_sorted_is_stable() {
    let keys = [3, 1, 2, 1, 3, 2, 1, 0, 3, 0, 2, 2, 1];
    let ranked = Ranked::from_keys(&keys);
    for stream in [
        Stream::new_sequential(ranked.clone()),
        Stream::new_parallel(ranked.clone()),
    ] {
        let sorted = stream.sorted(|a, b| a.key < b.key).to_vec().unwrap();
        for pair in sorted.windows(2) {
            assert!(pair[0].key <= pair[1].key);
            if pair[0].key == pair[1].key {
                assert!(pair[0].position < pair[1].position, "{pair:?}");
            }
        }
    }
}

#[test]
fn test_limit_negative() {
    for_each_factory(|name, stream| {
        let s = stream(Vec::new());
        let parallel = s.is_parallel();
        let s = s.limit(-1);
        assert_eq!(s.is_parallel(), parallel, "{name}");
        assert_eq!(
            s.err(),
            Some(&StreamError::InvalidArgument {
                operation: "limit",
                value: -1
            }),
            "{name}"
        );
    });
}

#[test]
fn test_limit() {
    let cases = [
        (100, vec![], vec![]),
        (100, vec![1, 2, 3], vec![1, 2, 3]),
        (0, vec![], vec![]),
        (3, vec![1, 2, 3], vec![1, 2, 3]),
        (0, vec![1, 2, 3], vec![]),
        (2, vec![1, 2, 3], vec![1, 2]),
    ];
    for_each_factory(|name, stream| {
        for (max_size, elements, expected) in &cases {
            let s = stream(elements.clone());
            let parallel = s.is_parallel();
            let s = s.limit(*max_size);
            assert_eq!(s.is_parallel(), parallel, "{name}");
            assert_eq!(&s.to_vec().unwrap(), expected, "{name}: limit {max_size}");
        }
    });
}

#[test]
fn test_skip_negative() {
    for_each_factory(|name, stream| {
        let s = stream(Vec::new()).skip(-1);
        assert!(
            matches!(
                s.err(),
                Some(StreamError::InvalidArgument {
                    operation: "skip",
                    ..
                })
            ),
            "{name}"
        );
    });
}

#[test]
fn test_skip() {
    let cases = [
        ("n is 0", 0, vec![1, 2, 3]),
        ("n greater than len", 4, vec![]),
        ("n equals len", 3, vec![]),
        ("n less than len", 2, vec![3]),
    ];
    for_each_factory(|name, stream| {
        for (case, n, expected) in &cases {
            let s = stream(vec![1, 2, 3]);
            let parallel = s.is_parallel();
            let s = s.skip(*n);
            assert_eq!(s.is_parallel(), parallel, "{name}: {case}");
            assert_eq!(&s.to_vec().unwrap(), expected, "{name}: {case}");
        }
    });
}

#[test]
fn test_skip_zero_is_identity() {
    for_each_factory(|name, stream| {
        let s = stream(vec![1, 2, 3]);
        let skipped = s.clone().skip(0);
        assert!(Stream::ptr_eq(&s, &skipped), "{name}");
    });
}

#[test]
fn test_distinct() {
    let no_duplicates = [
        (vec![], vec![]),
        (vec![1], vec![1]),
        (vec![1, 2], vec![1, 2]),
        (vec![1, 2, 3, 4, 5], vec![1, 2, 3, 4, 5]),
    ];
    let duplicates = [
        (vec![1, 1], vec![1]),
        (vec![1, 2, 1], vec![1, 2]),
        (vec![1, 2, 3, 3], vec![1, 2, 3]),
        (vec![3, 1, 3, 2, 1, 3], vec![3, 1, 2]),
    ];
    for_each_factory(|name, stream| {
        for (elements, expected) in no_duplicates.iter().chain(duplicates.iter()) {
            let s = stream(elements.clone());
            let parallel = s.is_parallel();
            let s = s.distinct(|v| *v, |a, b| a == b);
            assert_eq!(s.is_parallel(), parallel, "{name}");
            assert_eq!(&s.to_vec().unwrap(), expected, "{name}: {elements:?}");

            let hashed = stream(elements.clone()).distinct_by_key(|v| *v);
            assert_eq!(&hashed.to_vec().unwrap(), expected, "{name}: {elements:?}");
        }
    });
}

#[test]
fn test_distinct_without_transitivity() {
    // "Within one" is not transitive: 1~2 and 2~3 but not 1~3. Every
    // candidate is compared against each kept key, so 2 is dropped (close to
    // 1) while 3 survives (far from 1).
    let close = |a: &i32, b: &i32| (a - b).abs() <= 1;
    for_each_factory(|name, stream| {
        let kept = stream(vec![1, 2, 3, 5, 4, 7])
            .distinct(|v| *v, close)
            .to_vec()
            .unwrap();
        assert_eq!(kept, vec![1, 3, 5, 7], "{name}");
    });
}

#[test]
fn test_distinct_keeps_first_occurrence() {
    let ranked = Ranked::from_keys(&[4, 2, 4, 2, 9]);
    for stream in [
        Stream::new_sequential(ranked.clone()),
        Stream::new_parallel(ranked.clone()),
    ] {
        let kept = stream
            .distinct(|r| r.key, |a, b| a == b)
            .map(|r| r.position)
            .to_vec()
            .unwrap();
        assert_eq!(kept, vec![0, 1, 4]);
    }
}

#[test]
fn test_reduce() {
    for_each_factory(|name, stream| {
        assert_eq!(stream(Vec::new()).reduce(|a, b| a + b), Ok(None), "{name}");
        for len in 1..=10 {
            let expected = len * (len + 1) / 2;
            let result = stream((1..=len).collect()).reduce(|a, b| a + b);
            assert_eq!(result, Ok(Some(expected)), "{name}: {len} elements");
        }
    });
}

#[test]
fn test_reduce_is_left_fold() {
    for_each_factory(|name, stream| {
        let result = stream(vec![100, 10, 1]).reduce(|a, b| a - b);
        assert_eq!(result, Ok(Some(89)), "{name}");
    });
}

#[test]
fn test_count_and_collect() {
    for_each_factory(|name, stream| {
        assert_eq!(stream(vec![1, 2, 3]).count(), Ok(3), "{name}");
        let set: std::collections::BTreeSet<i32> = stream(vec![3, 1, 3]).collect().unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 3], "{name}");
    });
}

#[test]
fn test_sequential_transition() {
    for_each_factory(|name, stream| {
        assert!(!stream(Vec::new()).sequential().is_parallel(), "{name}");
        assert!(!stream(vec![1]).sequential().is_parallel(), "{name}");
        assert!(stream(Vec::new()).parallel().is_parallel(), "{name}");
    });
}

#[test]
fn test_transition_identity() {
    let s = Stream::new_sequential(vec![1, 2]);
    assert!(Stream::ptr_eq(&s, &s.clone().sequential()));
    let p = s.clone().parallel();
    assert!(!Stream::ptr_eq(&s, &p));
    assert!(p.is_parallel());
    assert!(Stream::ptr_eq(&p, &p.clone().parallel()));
    assert_eq!(p.sequential().to_vec().unwrap(), vec![1, 2]);
}

#[test]
fn test_parallel_on_executor() {
    let executor = Arc::new(ParallelExecutor::with_threads(2).unwrap());
    let s = Stream::new_sequential(vec![1, 2, 3]).parallel_on(Arc::clone(&executor));
    assert!(s.is_parallel());
    assert!(Stream::ptr_eq(&s, &s.clone().parallel_on(Arc::clone(&executor))));

    let other = s.clone().parallel_on(Arc::new(ParallelExecutor::new()));
    assert!(!Stream::ptr_eq(&s, &other));
    assert_eq!(other.to_vec().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_shared_handle_is_not_consumed() {
    for_each_factory(|name, stream| {
        let s = stream(vec![3, 1, 2]);
        let sorted = s.clone().sorted(|a, b| a < b).to_vec().unwrap();
        assert_eq!(sorted, vec![1, 2, 3], "{name}");
        assert_eq!(s.to_vec().unwrap(), vec![3, 1, 2], "{name}");
    });
}

#[test]
fn test_len_and_debug() {
    let s = Stream::new_sequential(vec![1, 2, 3]);
    assert_eq!(s.len(), Some(3));
    assert!(!s.is_empty());
    assert!(format!("{s:?}").contains("len: 3"));

    let failed = Stream::<i32>::failed(boom());
    assert_eq!(failed.len(), None);
    assert!(format!("{failed:?}").contains("error"));
}
