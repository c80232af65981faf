// HashTable integration tests (public API only).
//
// Each test states the behavior under check. The invariants exercised:
// - Round-trip: get returns the last value stored under a key.
// - New-key flag: insert reports true exactly when the key was absent.
// - Growth: decided on the pre-insert count; earlier keys survive it.
// - Ownership: keys are copied in; custom payloads are never freed.
use chained_hashtable::{Custom, HashTable, Value, INITIAL_CAPACITY};
use std::cell::Cell;
use std::hash::{BuildHasher, Hasher};
use std::rc::Rc;

// Test: the four-key walkthrough.
// Assumes: capacity starts at 8 and the growth check sees the pre-insert count.
// Verifies: four inserts leave capacity at 8 (the fourth sees 3/8); the next
// sees 4/8 and doubles first; "a" keeps its value throughout.
#[test]
fn four_keys_then_growth() {
    let mut m = HashTable::new();
    assert_eq!(m.capacity(), INITIAL_CAPACITY);
    assert!(m.insert("a", Value::integer(1)));
    assert!(m.insert("b", Value::integer(2)));
    assert!(m.insert("c", Value::integer(3)));
    assert!(m.insert("d", Value::integer(4)));
    assert_eq!(m.count(), 4);
    assert_eq!(m.capacity(), 8);
    assert_eq!(m.get("a"), Value::integer(1));

    assert!(m.insert("e", Value::integer(5)));
    assert_eq!(m.capacity(), 16);
    assert_eq!(m.count(), 5);
    assert_eq!(m.get("a"), Value::integer(1));
    assert_eq!(m.get("d"), Value::integer(4));
}

// Test: empty reads.
// Verifies: a fresh table yields Nil / false for unknown keys, and
// removing one leaves it unchanged.
#[test]
fn absent_key_reads() {
    let mut m = HashTable::new();
    assert_eq!(m.get("x"), Value::Nil);
    assert!(!m.contains("x"));
    assert!(!m.remove("x"));
    assert_eq!(m.count(), 0);
}

// Test: stored Nil versus absence.
// Verifies: both read as Nil; only contains tells them apart.
#[test]
fn stored_nil_is_present() {
    let mut m = HashTable::new();
    assert!(m.set_nil("n"));
    assert_eq!(m.get("n"), Value::Nil);
    assert!(m.contains("n"));
    assert!(!m.contains("missing"));
}

// Test: keys are copied on insert.
// Assumes: the caller may reuse or free its buffer right after the call.
// Verifies: rewriting and dropping the buffer does not disturb lookups.
#[test]
fn key_buffer_independence() {
    let mut m = HashTable::new();
    let mut buf = String::from("alpha");
    m.set_integer(&buf, 7);

    buf.clear();
    buf.push_str("omega");
    assert_eq!(m.get("alpha"), Value::integer(7));
    assert!(!m.contains(&buf));

    m.set_integer(&buf, 8);
    drop(buf);
    assert_eq!(m.get("alpha"), Value::integer(7));
    assert_eq!(m.get("omega"), Value::integer(8));
    assert_eq!(m.count(), 2);
}

// Counts drops of the referent behind a Custom handle.
struct Tracked {
    drops: Rc<Cell<usize>>,
    payload: u32,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

// Test: custom payloads stay caller-owned.
// Verifies: overwrite, remove, and dropping the table never drop the
// referent; it stays readable through the handle until the caller drops it.
#[test]
fn custom_payload_is_never_freed() {
    let drops = Rc::new(Cell::new(0));
    let mut owned = Box::new(Tracked {
        drops: drops.clone(),
        payload: 41,
    });
    let handle = Custom::from_mut(&mut *owned);

    let mut m = HashTable::new();
    assert!(m.set_custom("obj", handle));
    assert!(!m.set_custom("obj", handle));
    assert_eq!(m.get("obj").as_custom(), handle);

    // Growth relinks the node but leaves the handle alone.
    for i in 0..32 {
        m.set_integer(&format!("filler{i}"), i);
    }
    let p: *mut Tracked = m.get("obj").as_custom().as_ptr();
    unsafe { (*p).payload += 1 };

    assert!(m.remove("obj"));
    assert_eq!(drops.get(), 0);
    m.set_custom("again", handle);
    drop(m);
    assert_eq!(drops.get(), 0);

    assert_eq!(owned.payload, 42);
    drop(owned);
    assert_eq!(drops.get(), 1);
}

// Test: wrong-kind access on a value read back from the table.
// Verifies: the panicking accessor aborts; the fallible one reports the kinds.
#[test]
#[should_panic(expected = "value kind mismatch")]
fn wrong_kind_read_panics() {
    let mut m = HashTable::new();
    m.set_real("ratio", 2.5);
    let _ = m.get("ratio").as_boolean();
}

#[test]
fn wrong_kind_read_can_be_handled() {
    let mut m = HashTable::new();
    m.set_real("ratio", 2.5);
    let err = m.get("ratio").try_as_integer().unwrap_err();
    assert_eq!(err.to_string(), "value kind mismatch: expected integer, found real");
}

// Test: a large table round-trips and drops cleanly.
// Verifies: every key keeps its last value across many growth steps and
// interleaved removals.
#[test]
fn many_keys_round_trip() {
    let mut m = HashTable::new();
    for i in 0..10_000i64 {
        assert!(m.set_integer(&format!("k{i}"), i));
    }
    for i in (0..10_000i64).step_by(3) {
        assert!(m.remove(&format!("k{i}")));
    }
    for i in (1..10_000i64).step_by(3) {
        assert!(!m.set_real(&format!("k{i}"), i as f64));
    }
    for i in 0..10_000i64 {
        let k = format!("k{i}");
        match i % 3 {
            0 => assert!(!m.contains(&k)),
            1 => assert_eq!(m.get(&k), Value::real(i as f64)),
            _ => assert_eq!(m.get(&k), Value::integer(i)),
        }
    }
    assert_eq!(m.count(), 10_000 - 3334);
    assert_eq!(m.capacity(), 32_768);
}

// Sends every key to bucket 0.
struct ZeroBuildHasher;
struct ZeroHasher;

impl BuildHasher for ZeroBuildHasher {
    type Hasher = ZeroHasher;
    fn build_hasher(&self) -> ZeroHasher {
        ZeroHasher
    }
}

impl Hasher for ZeroHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Test: teardown of one long chain.
// Assumes: a constant hasher puts every key in the same chain.
// Verifies: all keys stay reachable through the chain, and dropping the
// table with it walks the chain without recursing.
#[test]
fn long_chain_teardown() {
    const N: i64 = 20_000;
    let mut m = HashTable::with_hasher(ZeroBuildHasher);
    for i in 0..N {
        assert!(m.set_integer(&format!("k{i}"), i));
    }
    assert_eq!(m.count(), N as usize);
    assert_eq!(m.get("k0"), Value::integer(0));
    assert_eq!(m.get(&format!("k{}", N - 1)), Value::integer(N - 1));
    drop(m);
}
