//! Basic usage of `FreeList`: put items back after use and get them again later.

use free_list::{FreeList, Linked};

#[derive(Linked)]
struct Record {
    id: u64,
    next: Option<Box<Self>>,
}

fn main() {
    let list = FreeList::new();

    // Nothing has been put back yet and there is no factory.
    assert!(list.get().is_none());

    list.put(Box::new(Record { id: 1, next: None }));
    list.put(Box::new(Record { id: 2, next: None }));

    // Items come back in last-in-first-out order.
    while let Some(record) = list.get() {
        println!("got record {}", record.id);
    }

    println!("free list is empty again");
}
