use clap::Parser;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use serial_ds::array::Array;
use serial_ds::codec::Serial;
use serial_ds::double_list::DoubleList;
use serial_ds::forward_list::ForwardList;
use serial_ds::full_binary_tree::FullBinaryTree;
use serial_ds::hash_table::HashTable;
use serial_ds::queue::Queue;
use serial_ds::stack::Stack;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ds-benchmark")]
#[command(about = "A container performance testing tool")]
struct Args {
    #[arg(long, default_value = "2000")]
    size: usize,

    #[arg(long, default_value = "tree")]
    container: String,

    #[arg(long, default_value = "42")]
    seed: u64,
}

fn main() {
    let args = Args::parse();

    println!(
        "Running with {} container and {} element count",
        args.container, args.size
    );

    let mut numbers: Vec<u64> = (0..args.size as u64).collect();
    numbers.shuffle(&mut rand::rngs::StdRng::seed_from_u64(args.seed));

    match args.container.as_str() {
        "tree" => bench_tree(&numbers),
        "array" => bench_array(&numbers),
        "forward-list" => bench_forward_list(&numbers),
        "double-list" => bench_double_list(&numbers),
        "queue" => bench_queue(&numbers),
        "stack" => bench_stack(&numbers),
        "hash-table" => bench_hash_table(&numbers),
        _ => panic!("Unexpected value for container: {}", args.container),
    }
}

fn report(phase: &str, from: Instant, to: Instant) {
    println!(
        "{} took {} seconds",
        phase,
        to.saturating_duration_since(from).as_secs_f32()
    );
}

fn round_trip<C: Serial>(container: &C, restored: &mut C) {
    let mut bytes = Vec::new();
    container.serialize_binary(&mut bytes).unwrap();
    restored.deserialize_binary(&mut bytes.as_slice()).unwrap();
}

fn bench_tree(numbers: &[u64]) {
    let mut tree = FullBinaryTree::new();

    let start = Instant::now();
    for &number in numbers {
        tree.insert(number);
    }
    let inserted = Instant::now();
    assert!(tree.is_full_binary_tree());
    for &number in numbers {
        assert!(tree.find(&number));
    }
    let found = Instant::now();
    let mut restored = FullBinaryTree::new();
    round_trip(&tree, &mut restored);
    assert_eq!(restored.len(), tree.len());
    let serialized = Instant::now();
    for &number in numbers {
        tree.remove(&number);
    }
    let end = Instant::now();

    report("Inserts", start, inserted);
    report("Shape check and finds", inserted, found);
    report("Serialize round trip", found, serialized);
    report("Removals", serialized, end);
    report("Total", start, end);
}

fn bench_array(numbers: &[u64]) {
    let mut array = Array::new();

    let start = Instant::now();
    for &number in numbers {
        array.push(number);
    }
    let inserted = Instant::now();
    for i in 0..array.len() {
        assert!(array.get(i).is_some());
    }
    let read = Instant::now();
    let mut restored = Array::new();
    round_trip(&array, &mut restored);
    assert_eq!(restored.len(), array.len());
    let serialized = Instant::now();
    while !array.is_empty() {
        array.remove(array.len() - 1).unwrap();
    }
    let end = Instant::now();

    report("Pushes", start, inserted);
    report("Reads", inserted, read);
    report("Serialize round trip", read, serialized);
    report("Removals", serialized, end);
    report("Total", start, end);
}

fn bench_forward_list(numbers: &[u64]) {
    let mut list = ForwardList::new();

    let start = Instant::now();
    for &number in numbers {
        list.push_front(number);
    }
    let inserted = Instant::now();
    for &number in numbers.iter().take(100) {
        assert!(list.find(&number));
    }
    let found = Instant::now();
    let mut restored = ForwardList::new();
    round_trip(&list, &mut restored);
    assert_eq!(restored.len(), list.len());
    let serialized = Instant::now();
    while list.pop_front().is_some() {}
    let end = Instant::now();

    report("Pushes", start, inserted);
    report("Finds", inserted, found);
    report("Serialize round trip", found, serialized);
    report("Removals", serialized, end);
    report("Total", start, end);
}

fn bench_double_list(numbers: &[u64]) {
    let mut list = DoubleList::new();

    let start = Instant::now();
    for &number in numbers {
        list.push_back(number);
    }
    let inserted = Instant::now();
    for i in (0..list.len()).step_by(7) {
        assert!(list.get(i).is_some());
    }
    let read = Instant::now();
    let mut restored = DoubleList::new();
    round_trip(&list, &mut restored);
    assert_eq!(restored.len(), list.len());
    let serialized = Instant::now();
    while list.pop_back().is_some() {}
    let end = Instant::now();

    report("Pushes", start, inserted);
    report("Indexed reads", inserted, read);
    report("Serialize round trip", read, serialized);
    report("Removals", serialized, end);
    report("Total", start, end);
}

fn bench_queue(numbers: &[u64]) {
    let mut queue = Queue::new();

    let start = Instant::now();
    for &number in numbers {
        queue.enqueue(number);
    }
    let inserted = Instant::now();
    let mut restored = Queue::new();
    round_trip(&queue, &mut restored);
    assert_eq!(restored.len(), queue.len());
    let serialized = Instant::now();
    while queue.dequeue().is_some() {}
    let end = Instant::now();

    report("Enqueues", start, inserted);
    report("Serialize round trip", inserted, serialized);
    report("Dequeues", serialized, end);
    report("Total", start, end);
}

fn bench_stack(numbers: &[u64]) {
    let mut stack = Stack::new();

    let start = Instant::now();
    for &number in numbers {
        stack.push(number);
    }
    let inserted = Instant::now();
    let mut restored = Stack::new();
    round_trip(&stack, &mut restored);
    assert_eq!(restored.len(), stack.len());
    let serialized = Instant::now();
    while stack.pop().is_some() {}
    let end = Instant::now();

    report("Pushes", start, inserted);
    report("Serialize round trip", inserted, serialized);
    report("Pops", serialized, end);
    report("Total", start, end);
}

fn bench_hash_table(numbers: &[u64]) {
    let mut table = HashTable::new();

    let start = Instant::now();
    for &number in numbers {
        table.insert(number, number);
    }
    let inserted = Instant::now();
    for &number in numbers {
        assert_eq!(table.get(&number), Some(&number));
    }
    let read = Instant::now();
    let mut restored = HashTable::new();
    round_trip(&table, &mut restored);
    assert_eq!(restored.len(), table.len());
    let serialized = Instant::now();
    for &number in numbers {
        assert!(table.remove(&number));
    }
    let end = Instant::now();

    report("Inserts", start, inserted);
    report("Lookups", inserted, read);
    report("Serialize round trip", read, serialized);
    report("Removals", serialized, end);
    report("Total", start, end);
}
