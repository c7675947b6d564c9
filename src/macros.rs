/// Helper macro to define functions returning global store signals.
/// Usage: `global_signal!(fn_name, store, accessor: Type);`
#[macro_export]
macro_rules! global_signal {
    ($vis:vis $name:ident, $store:ident, $accessor:ident : $ty:ty) => {
        $vis fn $name() -> ::leptos::RwSignal<$ty> {
            $crate::global_state::globals().$store.$accessor()
        }
    };
}

/// Generate multiple global signal accessors at once.
///
/// Usage:
/// `global_signals! {
///     pub fn1 => store.accessor1: Type1,
///     fn2 => store.accessor2: Type2,
/// }`
#[macro_export]
macro_rules! global_signals {
    ( $( $vis:vis $name:ident => $store:ident . $accessor:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $crate::global_signal!($vis $name, $store, $accessor : $ty);
        )+
    };
}
