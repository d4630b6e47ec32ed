/// Unit tests against the public streak engine and reducer
mod streak_engine;
mod streak_properties;
mod reducer;
