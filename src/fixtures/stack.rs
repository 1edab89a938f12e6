//! Empty-stack conformance fixture
//!
//! The fixture pushes a known number of elements during setup; the case pops
//! one more than that and passes only if the stack signals it is empty.

use std::fmt;

use crate::testing::{probe_until, Fixture, PhaseResult, Raised, Signal, TestCase};

/// Kind raised by [`Stack::pop`] on an empty stack
pub const EMPTY_STACK: &str = "EmptyStack";

/// Minimal LIFO container under test
#[derive(Debug, Default)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<T, EmptyStack> {
        self.items.pop().ok_or(EmptyStack)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Raised when popping an empty stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStack;

impl fmt::Display for EmptyStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("pop on an empty stack")
    }
}

impl Signal for EmptyStack {
    fn kind(&self) -> &'static str {
        EMPTY_STACK
    }
}

/// A stack pre-loaded with `size` elements
#[derive(Debug)]
pub struct StackFixture {
    size: usize,
    elements: Option<Vec<usize>>,
    stack: Option<Stack<usize>>,
}

impl StackFixture {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            elements: None,
            stack: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn stack_mut(&mut self) -> Result<&mut Stack<usize>, Raised> {
        self.stack
            .as_mut()
            .ok_or_else(|| Raised::Assertion("stack fixture was not set up".to_string()))
    }
}

impl Fixture for StackFixture {
    fn set_up(&mut self) -> PhaseResult {
        let elements: Vec<usize> = (0..self.size).collect();
        let stack = self.stack.insert(Stack::new());
        for element in &elements {
            stack.push(*element);
        }
        self.elements = Some(elements);
        Ok(())
    }

    fn tear_down(&mut self) -> PhaseResult {
        self.elements = None;
        self.stack = None;
        Ok(())
    }

    fn is_released(&self) -> bool {
        self.elements.is_none() && self.stack.is_none()
    }
}

/// Pop `size + overshoot` times, expecting the empty signal
pub fn pop_past_capacity(name: &str, size: usize, overshoot: usize) -> TestCase<StackFixture> {
    TestCase::with_fixture(
        name,
        move || StackFixture::new(size),
        move |fixture: &mut StackFixture| {
            let bound = fixture.size() + overshoot;
            let stack = fixture.stack_mut()?;
            probe_until(bound, || stack.pop())
        },
    )
    .expecting(EMPTY_STACK)
}

/// Cases contributed to the bundled suite
pub fn cases(size: usize) -> Vec<TestCase<StackFixture>> {
    vec![pop_past_capacity("empty_stack::signalled_past_capacity", size, 1)]
}
