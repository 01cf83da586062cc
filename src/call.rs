//! Argument forwarding for callback wrappers.
//!
//! Every wrapper in this crate forwards "all remaining arguments" to the
//! callback it wraps. The forwarding seam is a tuple: [`Callable<Args>`] is
//! implemented for closures and `fn` items of arity zero through five, and
//! each wrapper type implements it as well, so wrappers compose
//! (a logging decorator around a compute-once wrapper is itself callable).

/// A callback invocable with an argument tuple.
///
/// `Args` is the tuple of forwarded arguments: `()` for a nullary callback,
/// `(A,)` for unary, `(A, B)` for binary, and so on. Blanket implementations
/// cover any `FnMut` of arity up to five.
pub trait Callable<Args> {
    /// The callback's return type.
    type Output;

    /// Invokes the callback with the forwarded arguments.
    fn call(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($arg:ident)*) => {
        #[allow(non_snake_case)]
        impl<Func, Out, $($arg),*> Callable<($($arg,)*)> for Func
        where
            Func: FnMut($($arg),*) -> Out,
        {
            type Output = Out;

            fn call(&mut self, ($($arg,)*): ($($arg,)*)) -> Out {
                self($($arg),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A1);
impl_callable!(A1 A2);
impl_callable!(A1 A2 A3);
impl_callable!(A1 A2 A3 A4);
impl_callable!(A1 A2 A3 A4 A5);

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: i32, b: i32) -> i32 {
        a + b
    }

    // Fully qualified calls: `.call(..)` on a bare closure would collide
    // with the unstable `Fn::call` name.
    #[test]
    fn forwards_each_arity() {
        let mut nullary = || 7;
        assert_eq!(Callable::call(&mut nullary, ()), 7);

        let mut unary = |x: i32| x * 2;
        assert_eq!(Callable::call(&mut unary, (21,)), 42);

        let mut binary = add;
        assert_eq!(Callable::call(&mut binary, (10, 12)), 22);

        let mut quinary = |a: u8, b: u8, c: u8, d: u8, e: u8| u32::from(a + b + c + d + e);
        assert_eq!(Callable::call(&mut quinary, (1, 2, 3, 4, 5)), 15);
    }

    #[test]
    fn mutable_closures_keep_state_across_calls() {
        let mut count = 0u32;
        let mut bump = |by: u32| {
            count += by;
            count
        };
        assert_eq!(Callable::call(&mut bump, (2,)), 2);
        assert_eq!(Callable::call(&mut bump, (3,)), 5);
    }
}
