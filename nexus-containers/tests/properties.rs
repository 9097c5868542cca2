//! Randomized model tests.
//!
//! Each test drives a container and a std reference model with the same
//! seeded operation stream and compares them after every step.

use std::collections::{BinaryHeap as StdHeap, VecDeque};

use nexus_containers::{BinaryHeap, Handle, LinkedList, MaxFirst, MinFirst, Reverse};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn make_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn random_vec(rng: &mut SmallRng, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.gen_range(-1_000..1_000)).collect()
}

// ============================================================================
// Heap
// ============================================================================

#[test]
fn heap_drain_is_sorted() {
    let mut rng = make_rng(1);
    for len in [0, 1, 2, 3, 7, 64, 1000] {
        let data = random_vec(&mut rng, len);
        let mut expected = data.clone();
        expected.sort_unstable();

        let heap = BinaryHeap::from_vec(MinFirst, data.clone());
        assert_eq!(heap.into_sorted_vec(), expected);

        let mut heap = BinaryHeap::new(MaxFirst);
        for &v in &data {
            heap.push(v);
        }
        expected.reverse();
        assert_eq!(heap.into_sorted_vec(), expected);
    }
}

#[test]
fn heap_bulk_build_matches_pushes() {
    let mut rng = make_rng(2);
    for _ in 0..50 {
        let len = rng.gen_range(0..200);
        let data = random_vec(&mut rng, len);

        let built = BinaryHeap::from_vec(Reverse(MinFirst), data.clone());
        let mut pushed = BinaryHeap::new(Reverse(MinFirst));
        for v in data {
            pushed.push(v);
        }

        assert_eq!(built.into_sorted_vec(), pushed.into_sorted_vec());
    }
}

#[test]
fn heap_matches_std_under_mixed_ops() {
    let mut rng = make_rng(3);
    // std's heap is a max-heap.
    let mut model = StdHeap::new();
    let mut heap = BinaryHeap::new(MaxFirst);
    let (mut pushes, mut pops) = (0usize, 0usize);

    for _ in 0..10_000 {
        match rng.gen_range(0..10) {
            0..=5 => {
                let v: i64 = rng.gen_range(0..500);
                model.push(v);
                heap.push(v);
                pushes += 1;
            }
            6..=8 => {
                let got = heap.pop();
                if got.is_some() {
                    pops += 1;
                }
                assert_eq!(got, model.pop());
            }
            _ => {
                let v: i64 = rng.gen_range(0..500);
                model.push(v);
                let expected = model.pop();
                assert_eq!(Some(heap.push_pop(v)), expected);
            }
        }

        assert_eq!(heap.top(), model.peek());
        assert_eq!(heap.len(), pushes - pops);
        assert_eq!(heap.is_empty(), heap.len() == 0);
    }
}

#[test]
fn heap_closure_comparator_on_keys() {
    let mut rng = make_rng(4);
    let mut heap = BinaryHeap::new(|a: &(u32, usize), b: &(u32, usize)| a.0 < b.0);
    for id in 0..500 {
        heap.push((rng.gen_range(0..50), id));
    }

    let mut last = 0;
    while let Some((key, _)) = heap.pop() {
        assert!(key >= last, "heap order violated");
        last = key;
    }
}

// ============================================================================
// List
// ============================================================================

/// Mirror of the list: values and handles in order.
struct Model {
    items: VecDeque<(Handle, u32)>,
}

impl Model {
    fn position(&self, handle: Handle) -> usize {
        self.items
            .iter()
            .position(|&(h, _)| h == handle)
            .expect("handle tracked by model")
    }

    fn pick(&self, rng: &mut SmallRng) -> Option<Handle> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items[rng.gen_range(0..self.items.len())].0)
        }
    }
}

fn assert_same(list: &LinkedList<u32>, model: &Model) {
    assert_eq!(list.len(), model.items.len());
    assert_eq!(list.is_empty(), model.items.is_empty());

    let forward: Vec<u32> = list.iter().copied().collect();
    let expected: Vec<u32> = model.items.iter().map(|&(_, v)| v).collect();
    assert_eq!(forward, expected);

    let backward: Vec<u32> = list.iter().rev().copied().collect();
    assert_eq!(backward, expected.iter().rev().copied().collect::<Vec<_>>());

    let handles: Vec<Handle> = list.handles().collect();
    let expected: Vec<Handle> = model.items.iter().map(|&(h, _)| h).collect();
    assert_eq!(handles, expected);
}

#[test]
fn list_matches_model_under_mixed_ops() {
    let mut rng = make_rng(5);
    let mut list = LinkedList::new();
    let mut model = Model {
        items: VecDeque::new(),
    };
    let mut erased: Vec<Handle> = Vec::new();
    let mut next_value = 0u32;

    for _ in 0..5_000 {
        next_value += 1;
        let v = next_value;

        match rng.gen_range(0..11) {
            0 => {
                let h = list.push_back(v);
                model.items.push_back((h, v));
            }
            1 => {
                let h = list.push_front(v);
                model.items.push_front((h, v));
            }
            2 => {
                if let Some(at) = model.pick(&mut rng) {
                    let h = list.insert_before(v, at).unwrap();
                    let pos = model.position(at);
                    model.items.insert(pos, (h, v));
                }
            }
            3 => {
                if let Some(at) = model.pick(&mut rng) {
                    let h = list.insert_after(v, at).unwrap();
                    let pos = model.position(at);
                    model.items.insert(pos + 1, (h, v));
                }
            }
            4 => {
                let expected = model.items.pop_front();
                assert_eq!(list.pop_front(), expected.map(|(_, v)| v));
                erased.extend(expected.map(|(h, _)| h));
            }
            5 => {
                let expected = model.items.pop_back();
                assert_eq!(list.pop_back(), expected.map(|(_, v)| v));
                erased.extend(expected.map(|(h, _)| h));
            }
            6 => {
                if let Some(at) = model.pick(&mut rng) {
                    let pos = model.position(at);
                    let (_, expected) = model.items.remove(pos).unwrap();
                    assert_eq!(list.erase(at), Some(expected));
                    erased.push(at);
                }
            }
            7 => {
                if let Some(e) = model.pick(&mut rng) {
                    let changed = list.move_to_front(e);
                    let pos = model.position(e);
                    assert_eq!(changed, pos != 0);
                    let item = model.items.remove(pos).unwrap();
                    model.items.push_front(item);
                }
            }
            8 => {
                if let Some(e) = model.pick(&mut rng) {
                    let changed = list.move_to_back(e);
                    let pos = model.position(e);
                    assert_eq!(changed, pos + 1 != model.items.len());
                    let item = model.items.remove(pos).unwrap();
                    model.items.push_back(item);
                }
            }
            9 => {
                if let (Some(e), Some(at)) = (model.pick(&mut rng), model.pick(&mut rng)) {
                    list.move_before(e, at);
                    if e != at {
                        let item = model.items.remove(model.position(e)).unwrap();
                        let pos = model.position(at);
                        model.items.insert(pos, item);
                    }
                }
            }
            _ => {
                if let (Some(e), Some(at)) = (model.pick(&mut rng), model.pick(&mut rng)) {
                    list.move_after(e, at);
                    if e != at {
                        let item = model.items.remove(model.position(e)).unwrap();
                        let pos = model.position(at);
                        model.items.insert(pos + 1, item);
                    }
                }
            }
        }

        assert_same(&list, &model);

        // Erased handles never come back to life.
        if let Some(&stale) = erased.last() {
            assert!(!list.contains(stale));
            assert_eq!(list.get(stale), None);
            assert_eq!(list.erase(stale), None);
        }

        // Every live handle still reads its own value and neighbours.
        if let Some(h) = model.pick(&mut rng) {
            let pos = model.position(h);
            assert_eq!(list.get(h), Some(&model.items[pos].1));
            let prev = pos.checked_sub(1).map(|p| model.items[p].0);
            let next = model.items.get(pos + 1).map(|&(h, _)| h);
            assert_eq!(list.prev(h), prev);
            assert_eq!(list.next(h), next);
        }
    }

    for stale in erased {
        assert!(!list.contains(stale));
    }
}

#[test]
fn list_foreign_handles_never_mutate() {
    let mut rng = make_rng(6);
    let mut a: LinkedList<u32> = (0..32).collect();
    let mut b: LinkedList<u32> = (100..132).collect();
    let foreign: Vec<Handle> = a.handles().collect();
    let before: Vec<u32> = b.iter().copied().collect();

    for _ in 0..500 {
        let h = foreign[rng.gen_range(0..foreign.len())];
        let own = b.handles().nth(rng.gen_range(0..b.len())).unwrap();

        assert_eq!(b.insert_before(0, h), None);
        assert_eq!(b.insert_after(0, h), None);
        assert_eq!(b.erase(h), None);
        assert!(!b.move_to_front(h));
        assert!(!b.move_to_back(h));
        assert!(!b.move_before(h, own));
        assert!(!b.move_after(own, h));
        assert_eq!(b.next(h), None);
        assert_eq!(b.prev(h), None);
    }

    assert_eq!(b.iter().copied().collect::<Vec<_>>(), before);
    assert_eq!(a.len(), 32);
    a.clear();
    assert!(a.is_empty());
}
