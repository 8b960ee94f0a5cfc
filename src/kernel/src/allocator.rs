//! Kernel heap allocation.
//!
//! The heap is a static arena inside the kernel image, so no paging setup is
//! needed. Its only user is the interrupt-fed scancode queue.

use core::ptr::addr_of_mut;
use linked_list_allocator::LockedHeap;

/// The size of the kernel heap.
pub const HEAP_SIZE: usize = 16 * 1024; // 16 KiB

static mut HEAP: [u8; HEAP_SIZE] = [0; HEAP_SIZE];

static HEAP_READY: spin::Once<()> = spin::Once::new();

#[global_allocator]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Initialize the kernel heap.
///
/// Must run before the first allocation. Later calls do nothing.
pub fn init_heap() {
    HEAP_READY.call_once(|| {
        // SAFETY: HEAP is only ever touched here, and through the allocator
        // afterwards. The region is valid for the kernel's lifetime and the
        // Once guard hands it over exactly one time.
        unsafe {
            ALLOCATOR
                .lock()
                .init(addr_of_mut!(HEAP).cast::<u8>(), HEAP_SIZE);
        }
    });
}
