use coaster_core::{CoasterError, Result};
use coaster_math::{Aabb3, DVec3, Point3, Transform};
use coaster_mesh::TriangleMesh;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::frame::CLEAR_COLOR;

/// A named mesh in the scene
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub name: String,
    pub mesh: TriangleMesh,
    pub color: [f32; 3],
    /// Model transform applied when drawing.
    pub transform: Transform,
}

/// Cubemap background, one image per face in `CubemapFace::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Skybox {
    pub faces: [String; 6],
}

/// Model transforms of one mesh sampled over time.
#[derive(Debug, Clone)]
pub struct Keyframes {
    pub target: String,
    /// Seconds, increasing.
    pub times: Vec<f64>,
    pub transforms: Vec<Transform>,
}

/// A 3D scene for visualization
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    pub skybox: Option<Skybox>,
    pub animation: Option<Keyframes>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh with a name and color at the identity transform
    pub fn add_mesh(&mut self, name: &str, mesh: TriangleMesh, color: [f32; 3]) {
        self.meshes.push(SceneMesh {
            name: name.to_string(),
            mesh,
            color,
            transform: Transform::identity(),
        });
    }

    pub fn mesh(&self, name: &str) -> Option<&SceneMesh> {
        self.meshes.iter().find(|m| m.name == name)
    }

    /// Move a mesh by replacing its model transform.
    pub fn set_transform(&mut self, name: &str, transform: Transform) -> Result<()> {
        let scene_mesh = self
            .meshes
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| CoasterError::NotFound(format!("scene mesh '{name}'")))?;
        scene_mesh.transform = transform;
        Ok(())
    }

    pub fn set_skybox(&mut self, skybox: Skybox) {
        self.skybox = Some(skybox);
    }

    /// Attach keyframes for playback in the exported viewer.
    pub fn set_animation(&mut self, keyframes: Keyframes) -> Result<()> {
        if self.mesh(&keyframes.target).is_none() {
            return Err(CoasterError::NotFound(format!(
                "animation target '{}'",
                keyframes.target
            )));
        }
        if keyframes.times.len() != keyframes.transforms.len() {
            return Err(CoasterError::invalid_input(format!(
                "{} keyframe times for {} transforms",
                keyframes.times.len(),
                keyframes.transforms.len()
            )));
        }
        self.animation = Some(keyframes);
        Ok(())
    }

    /// Compute scene bounding box, with model transforms applied
    pub fn bounds(&self) -> Option<Aabb3> {
        let all_points: Vec<Point3> = self
            .meshes
            .iter()
            .flat_map(|m| m.mesh.positions.iter().map(|&p| m.transform.transform_point(p)))
            .collect();
        Aabb3::from_points(&all_points)
    }

    /// Total triangle count across all meshes
    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.triangle_count()).sum()
    }

    /// Export scene as a standalone HTML file with embedded Three.js viewer
    pub fn export_html(&self, path: &Path) -> std::io::Result<()> {
        let bounds = self
            .bounds()
            .filter(|b| b.min.is_finite() && b.max.is_finite())
            .unwrap_or_else(|| Aabb3::new(Point3::ZERO, DVec3::splat(1.0)));
        let center = bounds.center();
        let camera_distance = bounds.extents().length() * 1.5;

        let mut file = BufWriter::new(std::fs::File::create(path)?);

        write!(file, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Rollercoaster</title>
    <style>
        body {{ margin: 0; overflow: hidden; font-family: sans-serif; }}
        #info {{
            position: absolute;
            top: 10px;
            left: 10px;
            background: rgba(0, 0, 0, 0.7);
            color: white;
            padding: 10px;
            border-radius: 5px;
            font-size: 13px;
        }}
    </style>
</head>
<body>
    <div id="info">
        <div>Meshes: {}</div>
        <div>Triangles: {}</div>
        <div>Drag to orbit, N toggles the skybox</div>
    </div>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
    <script>
"#, self.meshes.len(), self.total_triangles())?;

        writeln!(file, "        const meshData = [")?;
        for scene_mesh in &self.meshes {
            writeln!(file, "            {{")?;
            writeln!(file, "                name: {:?},", scene_mesh.name)?;
            writeln!(file, "                color: [{}, {}, {}],",
                scene_mesh.color[0], scene_mesh.color[1], scene_mesh.color[2])?;
            writeln!(file, "                matrix: {},", js_floats(&scene_mesh.transform.to_cols_f32())?)?;
            let positions: Vec<f32> = scene_mesh
                .mesh
                .positions
                .iter()
                .flat_map(|p| p.as_vec3().to_array())
                .collect();
            writeln!(file, "                positions: {},", js_floats(&positions)?)?;
            let normals: Vec<f32> = scene_mesh
                .mesh
                .normals
                .iter()
                .flat_map(|n| n.as_vec3().to_array())
                .collect();
            writeln!(file, "                normals: {},", js_floats(&normals)?)?;
            let indices: Vec<String> = scene_mesh.mesh.indices.iter().map(u32::to_string).collect();
            writeln!(file, "                indices: [{}]", indices.join(","))?;
            writeln!(file, "            }},")?;
        }
        writeln!(file, "        ];")?;

        match &self.animation {
            Some(anim) => {
                let matrices: Vec<f32> = anim.transforms.iter().flat_map(|t| t.to_cols_f32()).collect();
                let times: Vec<f32> = anim.times.iter().map(|&t| t as f32).collect();
                writeln!(file, "        const animation = {{ target: {:?}, times: {}, matrices: {} }};",
                    anim.target, js_floats(&times)?, js_floats(&matrices)?)?;
            }
            None => writeln!(file, "        const animation = null;")?,
        }

        match &self.skybox {
            Some(skybox) => writeln!(file, "        const skyboxFaces = {:?};", skybox.faces)?,
            None => writeln!(file, "        const skyboxFaces = null;")?,
        }

        write!(file, r#"
        const clearColor = new THREE.Color({}, {}, {});
        const scene = new THREE.Scene();
        scene.background = clearColor;

        const camera = new THREE.PerspectiveCamera(45, window.innerWidth / window.innerHeight, 0.1, 1000);
        const renderer = new THREE.WebGLRenderer({{ antialias: true }});
        renderer.setSize(window.innerWidth, window.innerHeight);
        document.body.appendChild(renderer.domElement);

        scene.add(new THREE.AmbientLight(0x404040, 2));
        const sun = new THREE.DirectionalLight(0xffffff, 1);
        sun.position.set(1, 1, 1);
        scene.add(sun);

        const objects = {{}};
        meshData.forEach(data => {{
            const geometry = new THREE.BufferGeometry();
            geometry.setAttribute('position', new THREE.Float32BufferAttribute(data.positions, 3));
            if (data.normals.length) {{
                geometry.setAttribute('normal', new THREE.Float32BufferAttribute(data.normals, 3));
            }} else {{
                geometry.computeVertexNormals();
            }}
            geometry.setIndex(data.indices);
            const material = new THREE.MeshPhongMaterial({{
                color: new THREE.Color(data.color[0], data.color[1], data.color[2]),
                side: THREE.DoubleSide
            }});
            const mesh = new THREE.Mesh(geometry, material);
            mesh.matrixAutoUpdate = false;
            mesh.matrix.fromArray(data.matrix);
            scene.add(mesh);
            objects[data.name] = mesh;
        }});

        let skyboxTexture = null;
        if (skyboxFaces) {{
            skyboxTexture = new THREE.CubeTextureLoader().load(skyboxFaces);
        }}
        let showSkybox = true;
        scene.background = skyboxTexture || clearColor;
        window.addEventListener('keydown', (e) => {{
            if (e.code === 'KeyN' && !e.repeat) {{
                showSkybox = !showSkybox;
                scene.background = showSkybox && skyboxTexture ? skyboxTexture : clearColor;
            }}
        }});

        const center = new THREE.Vector3({}, {}, {});
        let radius = {};
        let theta = Math.PI / 4;
        let phi = Math.PI / 3;
        function updateCameraPosition() {{
            camera.position.set(
                center.x + radius * Math.sin(phi) * Math.cos(theta),
                center.y + radius * Math.cos(phi),
                center.z + radius * Math.sin(phi) * Math.sin(theta)
            );
            camera.lookAt(center);
        }}
        updateCameraPosition();

        let dragging = false;
        let last = {{ x: 0, y: 0 }};
        renderer.domElement.addEventListener('mousedown', (e) => {{
            dragging = true;
            last = {{ x: e.clientX, y: e.clientY }};
        }});
        renderer.domElement.addEventListener('mouseup', () => {{ dragging = false; }});
        renderer.domElement.addEventListener('mousemove', (e) => {{
            if (!dragging) return;
            theta -= (e.clientX - last.x) * 0.01;
            phi = Math.max(0.1, Math.min(Math.PI - 0.1, phi + (e.clientY - last.y) * 0.01));
            last = {{ x: e.clientX, y: e.clientY }};
            updateCameraPosition();
        }});
        renderer.domElement.addEventListener('wheel', (e) => {{
            e.preventDefault();
            radius = Math.max(1, radius + e.deltaY * 0.01);
            updateCameraPosition();
        }});
        window.addEventListener('resize', () => {{
            camera.aspect = window.innerWidth / window.innerHeight;
            camera.updateProjectionMatrix();
            renderer.setSize(window.innerWidth, window.innerHeight);
        }});

        const clock = new THREE.Clock();
        function animate() {{
            requestAnimationFrame(animate);
            if (animation && animation.times.length && objects[animation.target]) {{
                const times = animation.times;
                const t = clock.getElapsedTime() % (times[times.length - 1] || 1);
                let k = 0;
                while (k + 1 < times.length && times[k + 1] <= t) k++;
                objects[animation.target].matrix.fromArray(animation.matrices, k * 16);
            }}
            renderer.render(scene, camera);
        }}
        animate();
    </script>
</body>
</html>
"#,
            CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2],
            center.x, center.y, center.z,
            camera_distance.max(1.0)
        )?;

        file.flush()?;
        log::info!("exported scene to {}", path.display());
        Ok(())
    }
}

/// Shortest round-trip JSON array; non-finite values become `null`.
fn js_floats(values: &[f32]) -> std::io::Result<String> {
    Ok(serde_json::to_string(values)?)
}
