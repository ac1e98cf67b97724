/// Declare operations with their documentation.
///
/// Each entry generates a unit struct implementing `Operation`; the module
/// also gets a `register` function adding all of them to a registry.
///
/// ```ignore
/// define_operations! {
///     Dup ("dup", 1 -> 2) [
///         brief: "Duplicate top of stack",
///         stack: "( a -- a a )",
///         example: "1 dup",
///         see_also: ["drop"],
///     ] |calc| {
///         Ok(calc.stack_mut().dup()?)
///     }
/// }
/// ```
///
/// Optional keys: `aliases: [...]` before `brief`, and `undo: false` after
/// `see_also` for operations that never touch the stack.
macro_rules! define_operations {
    (
        $(
            $ty:ident ($name:literal, $args:literal -> $results:literal) [
                $(aliases: [$($alias:literal),* $(,)?],)?
                brief: $brief:literal,
                stack: $stack:literal,
                example: $example:literal,
                see_also: [$($see:literal),* $(,)?],
                $(undo: $undo:literal,)?
            ] |$calc:ident| $body:block
        )*
    ) => {
        $(
            #[doc = $brief]
            pub struct $ty;

            impl rpn_vm::Operation for $ty {
                fn name(&self) -> &'static str {
                    $name
                }

                fn aliases(&self) -> &'static [&'static str] {
                    &[$($($alias),*)?]
                }

                fn num_args(&self) -> i32 {
                    $args
                }

                fn num_results(&self) -> i32 {
                    $results
                }

                fn saves_undo(&self) -> bool {
                    true $(&& $undo)?
                }

                fn doc(&self) -> Option<rpn_vm::OperationDoc> {
                    Some(rpn_vm::OperationDoc {
                        name: $name,
                        brief: $brief,
                        stack: $stack,
                        example: $example,
                        see_also: &[$($see),*],
                    })
                }

                fn op(&self, $calc: &mut rpn_vm::Calculator) -> rpn_core::CalcResult<()> $body
            }
        )*

        /// Register this module's operations.
        pub fn register(registry: &mut rpn_vm::OperationRegistry) {
            $(
                registry.register($ty);
            )*
        }
    };
}
