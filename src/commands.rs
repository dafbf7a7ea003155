macro_rules! list {
    ($($pub:vis $module:ident),+) => {
        $(
            $pub mod $module;
        )+

        pub fn list() -> Vec<crate::utils::poise::Command> {
            vec![
                $($module::$module()),+
            ]
        }
    };
}

list! {
    pub search,
    pub rem
}
