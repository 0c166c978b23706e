use core::marker::PhantomData;
use core::time::Duration;

use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use feral_core::nodes::NodeDefinition;
use feral_core::types::{BoxedNode, BoxedTask};


/// How long we wait for a requested definition before reporting a timeout.
pub const NODE_DEFINITION_LOAD_TIMEOUT: Duration = Duration::from_secs(2);


/// One authored Node, as stored in a data file, e.g. (JSON):
///
/// ```json
/// {
///     "name": "WolfStopsChasing",
///     "node": { "type": "CheckProximityAttackStop", "max_distance": 20.0 }
/// }
/// ```
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinitionAsset {
    pub name: String,
    pub node: NodeDefinition,
}

impl NodeDefinitionAsset {
    pub fn to_node(&self) -> BoxedNode {
        self.node.to_node()
    }

    pub fn create_task(&self) -> BoxedTask {
        self.node.create_task()
    }
}


pub trait NodeDefinitionLoaderBackend: TypePath + Send + Sync + 'static {
    /// What type does the loader return as a loader on error.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Must be able to load from a byte array.
    fn from_slice(v: &[u8]) -> core::result::Result<NodeDefinitionAsset, Self::Error>;

    /// What extensions should be read for this (by default)?
    fn extensions() -> &'static [&'static str] {
        &[]
    }
}

#[cfg(any(feature = "json_support", test))]
pub mod json_support {
    use bevy::reflect::TypePath;

    use super::{NodeDefinitionLoaderBackend, NodeDefinitionAsset};

    #[derive(Default, TypePath)]
    pub struct JsonNodeDefinitionLoader;

    impl NodeDefinitionLoaderBackend for JsonNodeDefinitionLoader {
        type Error = serde_json::Error;

        fn from_slice(v: &[u8]) -> core::result::Result<NodeDefinitionAsset, Self::Error> {
            serde_json::from_slice(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["node.json"]
        }
    }
}


#[cfg(any(feature = "toml_support", test))]
pub mod toml_support {
    use bevy::reflect::TypePath;

    use super::{NodeDefinitionLoaderBackend, NodeDefinitionAsset};

    #[derive(Default, TypePath)]
    pub struct TomlNodeDefinitionLoader;

    impl NodeDefinitionLoaderBackend for TomlNodeDefinitionLoader {
        type Error = toml::de::Error;

        fn from_slice(v: &[u8]) -> core::result::Result<NodeDefinitionAsset, Self::Error> {
            toml::from_slice(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["node.toml"]
        }
    }
}


#[cfg(any(feature = "ron_support", test))]
pub mod ron_support {
    use bevy::reflect::TypePath;

    use super::{NodeDefinitionLoaderBackend, NodeDefinitionAsset};

    #[derive(Default, TypePath)]
    pub struct RonNodeDefinitionLoader;

    impl NodeDefinitionLoaderBackend for RonNodeDefinitionLoader {
        type Error = ron::de::SpannedError;

        fn from_slice(v: &[u8]) -> core::result::Result<NodeDefinitionAsset, Self::Error> {
            ron::de::from_bytes(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["node.ron"]
        }
    }
}


#[cfg(any(feature = "yaml_support", test))]
pub mod yaml_support {
    use bevy::reflect::TypePath;

    use super::{NodeDefinitionLoaderBackend, NodeDefinitionAsset};

    #[derive(Default, TypePath)]
    pub struct YamlNodeDefinitionLoader;

    impl NodeDefinitionLoaderBackend for YamlNodeDefinitionLoader {
        type Error = serde_saphyr::Error;

        fn from_slice(v: &[u8]) -> core::result::Result<NodeDefinitionAsset, Self::Error> {
            serde_saphyr::from_slice(v)
        }

        fn extensions() -> &'static [&'static str] {
            &["node.yaml", "node.yml"]
        }
    }
}


// Asset loader
#[derive(Default, TypePath)]
pub struct NodeDefinitionLoader<B: NodeDefinitionLoaderBackend>(PhantomData<B>);

impl<B: NodeDefinitionLoaderBackend> NodeDefinitionLoader<B> {
    fn from_slice(v: &[u8]) -> core::result::Result<NodeDefinitionAsset, B::Error> {
        B::from_slice(v)
    }
}

impl<B: NodeDefinitionLoaderBackend> AssetLoader for NodeDefinitionLoader<B> {
    type Asset = NodeDefinitionAsset;
    type Settings = ();
    type Error = Box<dyn core::error::Error + Send + Sync + 'static>;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _ctx: &mut LoadContext<'_>
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        Self::from_slice(&bytes).map_err(|err| {
            #[cfg(feature = "logging")]
            bevy::log::error!("NodeDefinitionLoader error: {:?}", err);
            err.into()
        })
    }

    fn extensions(&self) -> &[&str] {
        B::extensions()
    }
}

#[derive(Resource, Default)]
struct NodeDefinitionHandles(pub HashMap<String, Handle<NodeDefinitionAsset>>);


#[derive(Resource, Default)]
struct AssetLoadTimeouts(pub HashMap<String, Timer>);


/// Asks the loader to read a Node definition from `filename`
/// (any path the AssetServer understands, including `source://` prefixes).
#[derive(Event, Debug)]
pub struct LoadNodeDefinitionRequest {
    filename: String
}

impl LoadNodeDefinitionRequest {
    pub fn new<IS: Into<String>>(filename: IS) -> Self {
        Self {
            filename: filename.into()
        }
    }
}

#[derive(Event, Debug)]
pub struct NodeDefinitionLoaded {
    pub filename: String,
    pub asset_handle: Handle<NodeDefinitionAsset>,
}

#[derive(Event, Debug)]
pub struct NodeDefinitionLoadingTimeout {
    pub filename: String,
    pub timeout_time: f32,
}

fn load_asset(
    event: On<LoadNodeDefinitionRequest>,
    asset_server: Res<AssetServer>,
    mut handles: ResMut<NodeDefinitionHandles>,
    mut timers: ResMut<AssetLoadTimeouts>,
) {
    let asset_path = event.event().filename.to_owned();
    #[cfg(feature = "logging")]
    bevy::log::info!("Reading Node definition from {}...", &asset_path);
    let handle: Handle<NodeDefinitionAsset> = asset_server.load(asset_path.to_owned());
    handles.0.entry(asset_path.to_owned()).or_insert(handle);
    timers.0.insert(asset_path, Timer::new(NODE_DEFINITION_LOAD_TIMEOUT, TimerMode::Once));
}

/// Reports each pending request exactly once: either as loaded (as soon as the
/// asset shows up) or as timed out.
fn poll_pending_loads(
    time: Res<Time>,
    handles: Res<NodeDefinitionHandles>,
    assets: Res<Assets<NodeDefinitionAsset>>,
    mut timers: ResMut<AssetLoadTimeouts>,
    mut commands: Commands,
) {
    timers.0.retain(|key, timer| {
        let handle = handles.0.get(key);
        let loaded = handle.filter(|handle| assets.contains(*handle));

        if let Some(handle) = loaded {
            #[cfg(feature = "logging")]
            bevy::log::info!("Successfully loaded Node definition from file {:?}...", key);
            commands.trigger(NodeDefinitionLoaded {
                filename: key.to_owned(),
                asset_handle: handle.to_owned(),
            });
            return false;
        }

        timer.tick(time.delta());

        if timer.is_finished() {
            let elapsed_time = timer.elapsed_secs();
            #[cfg(feature = "logging")]
            bevy::log::warn!(
                "Loading Node definition from file {:?} timed out after {:?}s!",
                key, elapsed_time
            );
            commands.trigger(NodeDefinitionLoadingTimeout {
                filename: key.to_owned(),
                timeout_time: elapsed_time,
            });
            return false;
        }

        true
    });
}


#[derive(Default)]
pub struct NodeDefinitionAssetPlugin<B: NodeDefinitionLoaderBackend>(PhantomData<B>);


impl<B: NodeDefinitionLoaderBackend + Default> bevy::app::Plugin for NodeDefinitionAssetPlugin<B> {
    fn build(&self, app: &mut bevy::app::App) {
        if !app.is_plugin_added::<AssetPlugin>() {
            app.add_plugins(AssetPlugin::default());
        }

        // Shared between all formats; only the first backend plugin sets it up.
        if !app.world().contains_resource::<NodeDefinitionHandles>() {
            app
            .init_resource::<NodeDefinitionHandles>()
            .init_asset::<NodeDefinitionAsset>()
            .init_resource::<AssetLoadTimeouts>()
            .add_observer(load_asset)
            .add_systems(First, poll_pending_loads)
            ;
        }

        app.init_asset_loader::<NodeDefinitionLoader<B>>();
    }

    fn is_unique(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use bevy::asset::io::AssetSourceBuilder;
    use feral_core::nodes::CheckProximityAttackStopNode;
    use feral_core::tree::Node;

    use super::*;
    use super::json_support::JsonNodeDefinitionLoader;
    use super::ron_support::RonNodeDefinitionLoader;
    use super::toml_support::TomlNodeDefinitionLoader;
    use super::yaml_support::YamlNodeDefinitionLoader;

    fn wolf(max_distance: f32) -> NodeDefinitionAsset {
        NodeDefinitionAsset {
            name: "WolfStopsChasing".to_string(),
            node: CheckProximityAttackStopNode::new(max_distance).unwrap().into(),
        }
    }

    #[test]
    fn test_load_json() {
        let src = br#"{
            "name": "WolfStopsChasing",
            "node": { "type": "CheckProximityAttackStop", "max_distance": 20.0 }
        }"#;

        assert_eq!(NodeDefinitionLoader::<JsonNodeDefinitionLoader>::from_slice(src).unwrap(), wolf(20.));
    }

    #[test]
    fn test_load_ron() {
        let src = br#"(
            name: "WolfStopsChasing",
            node: { "type": "CheckProximityAttackStop", "max_distance": 20.0 },
        )"#;

        assert_eq!(NodeDefinitionLoader::<RonNodeDefinitionLoader>::from_slice(src).unwrap(), wolf(20.));
    }

    #[test]
    fn test_load_yaml() {
        let src = b"name: WolfStopsChasing\nnode:\n  type: CheckProximityAttackStop\n  max_distance: 20.0\n";

        assert_eq!(NodeDefinitionLoader::<YamlNodeDefinitionLoader>::from_slice(src).unwrap(), wolf(20.));
    }

    #[test]
    fn test_load_toml() {
        let src = b"name = \"WolfStopsChasing\"\n\n[node]\ntype = \"CheckProximityAttackStop\"\nmax_distance = 20.0\n";

        assert_eq!(NodeDefinitionLoader::<TomlNodeDefinitionLoader>::from_slice(src).unwrap(), wolf(20.));
    }

    #[test]
    fn test_missing_distance_uses_default() {
        let src = br#"{"name": "Lazy", "node": {"type": "CheckProximityAttackStop"}}"#;
        let asset = NodeDefinitionLoader::<JsonNodeDefinitionLoader>::from_slice(src).unwrap();

        assert_eq!(asset.node, NodeDefinition::CheckProximityAttackStop(CheckProximityAttackStopNode::default()));
    }

    #[test]
    fn test_out_of_range_distance_is_clamped() {
        let src = br#"{"name": "Eager", "node": {"type": "CheckProximityAttackStop", "max_distance": 500.0}}"#;
        let asset = NodeDefinitionLoader::<JsonNodeDefinitionLoader>::from_slice(src).unwrap();

        assert_eq!(asset, NodeDefinitionAsset { name: "Eager".to_string(), ..wolf(50.) });
    }

    #[test]
    fn test_malformed_definition_is_an_error() {
        let src = br#"{"name": "Broken", "node": {"type": "CheckProximityAttackStop", "max_distance": "far"}}"#;

        assert!(NodeDefinitionLoader::<JsonNodeDefinitionLoader>::from_slice(src).is_err());
    }

    #[test]
    fn test_loaded_definition_creates_tasks() {
        let asset = wolf(12.);

        assert_eq!(asset.to_node().name(), "CheckProximityAttackStop");
        let _task = asset.create_task();
    }

    #[test]
    fn test_extensions_do_not_clash_between_formats() {
        let mut all: Vec<&str> = Vec::new();
        all.extend(JsonNodeDefinitionLoader::extensions());
        all.extend(RonNodeDefinitionLoader::extensions());
        all.extend(TomlNodeDefinitionLoader::extensions());
        all.extend(YamlNodeDefinitionLoader::extensions());

        let count = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), count);
    }

    #[derive(Resource, Default, Debug)]
    struct LoadOutcomes {
        loaded: Vec<(String, Handle<NodeDefinitionAsset>)>,
        timed_out: Vec<String>,
    }

    impl LoadOutcomes {
        fn resolved(&self) -> usize {
            self.loaded.len() + self.timed_out.len()
        }

        fn loaded_names(&self) -> Vec<&str> {
            let mut names: Vec<&str> = self.loaded.iter().map(|(name, _)| name.as_str()).collect();
            names.sort();
            names
        }
    }

    fn record_loaded(
        trigger: On<NodeDefinitionLoaded>,
        mut outcomes: ResMut<LoadOutcomes>,
    ) {
        let evt = trigger.event();
        #[cfg(feature = "logging")]
        bevy::log::info!("Node definition loaded from {:?} as {:?}", evt.filename, evt.asset_handle);
        outcomes.loaded.push((evt.filename.to_owned(), evt.asset_handle.to_owned()));
    }

    fn record_timeout(
        trigger: On<NodeDefinitionLoadingTimeout>,
        mut outcomes: ResMut<LoadOutcomes>,
    ) {
        let evt = trigger.event();
        #[cfg(feature = "logging")]
        bevy::log::warn!("Node definition loading from {:?} timed out after {:?}s", evt.filename, evt.timeout_time);
        outcomes.timed_out.push(evt.filename.to_owned());
    }

    /// An App reading from the crate's `test_assets` directory, with both default format backends.
    fn build_loader_app() -> App {
        let mut app = App::new();
        app
        .register_asset_source(
            "test_assets",
            AssetSourceBuilder::platform_default(
                "test_assets",
                None,
            )
        )
        .add_plugins((
            MinimalPlugins,
            NodeDefinitionAssetPlugin::<JsonNodeDefinitionLoader>::default(),
            NodeDefinitionAssetPlugin::<RonNodeDefinitionLoader>::default(),
        ))
        .init_resource::<LoadOutcomes>()
        .add_observer(record_loaded)
        .add_observer(record_timeout)
        ;
        app.finish();
        app.cleanup();
        app
    }

    fn update_until_resolved(app: &mut App, expected: usize) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.world().resource::<LoadOutcomes>().resolved() < expected {
            assert!(Instant::now() < deadline, "Node definition requests were never resolved");
            app.update();
            std::thread::sleep(Duration::from_millis(20));
        }
    }

    #[test]
    fn test_requests_resolve_as_loaded_or_timed_out() {
        let mut app = build_loader_app();
        app.world_mut().trigger(LoadNodeDefinitionRequest::new("test_assets://wolf.node.json"));
        app.world_mut().trigger(LoadNodeDefinitionRequest::new("test_assets://bear.node.ron"));
        app.world_mut().trigger(LoadNodeDefinitionRequest::new("test_assets://missing.node.json"));

        update_until_resolved(&mut app, 3);

        // Each request is reported exactly once.
        for _ in 0..5 {
            app.update();
        }

        let outcomes = app.world().resource::<LoadOutcomes>();
        assert_eq!(outcomes.loaded_names(), vec!["test_assets://bear.node.ron", "test_assets://wolf.node.json"]);
        assert_eq!(outcomes.timed_out, vec!["test_assets://missing.node.json".to_string()]);
    }

    #[test]
    fn test_backend_plugins_share_assets_and_handles() {
        let mut app = build_loader_app();
        app.world_mut().trigger(LoadNodeDefinitionRequest::new("test_assets://wolf.node.json"));
        app.world_mut().trigger(LoadNodeDefinitionRequest::new("test_assets://bear.node.ron"));

        update_until_resolved(&mut app, 2);

        let world = app.world();
        assert_eq!(world.resource::<NodeDefinitionHandles>().0.len(), 2);
        assert!(world.resource::<LoadOutcomes>().timed_out.is_empty());

        let assets = world.resource::<Assets<NodeDefinitionAsset>>();
        let mut loaded: Vec<NodeDefinitionAsset> = world.resource::<LoadOutcomes>().loaded
            .iter()
            .filter_map(|(_, handle)| assets.get(handle).cloned())
            .collect();
        loaded.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(loaded, vec![
            NodeDefinitionAsset { name: "BearStopsChasing".to_string(), ..wolf(35.) },
            wolf(20.),
        ]);
    }
}
